mod code;
mod path;

pub use code::*;
use operation::Location;
pub use path::*;
use serde::ser::SerializeMap;
use std::borrow::Cow;

pub type GraphqlResult<T> = Result<T, GraphqlError>;

#[derive(Debug, Clone)]
pub struct GraphqlError {
    pub message: Cow<'static, str>,
    pub code: ErrorCode,
    pub locations: Vec<Location>,
    pub path: Option<ErrorPath>,
    // Serialized as a map, but kept as a Vec for efficiency.
    pub extensions: Vec<(Cow<'static, str>, serde_json::Value)>,
}

impl GraphqlError {
    pub fn new(message: impl Into<Cow<'static, str>>, code: ErrorCode) -> Self {
        GraphqlError {
            message: message.into(),
            code,
            locations: Vec::new(),
            path: None,
            extensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    #[must_use]
    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<ErrorPath>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<serde_json::Value>) -> Self {
        let key = key.into();
        self.extensions.push((key, value.into()));
        self
    }

    #[must_use]
    pub fn with_extensions(
        mut self,
        extensions: impl IntoIterator<Item = (impl Into<Cow<'static, str>>, impl Into<serde_json::Value>)>,
    ) -> Self {
        for (key, value) in extensions {
            self.extensions.push((key.into(), value.into()));
        }
        self
    }

    // ------------- //
    // Common errors //
    // ------------- //

    pub fn non_null_violation(parent_type: &str, field: &str) -> Self {
        GraphqlError::new(
            format!("Cannot return null for non-nullable field {parent_type}.{field}"),
            ErrorCode::NonNullViolation,
        )
    }

    /// Masks the details of a failed leaf serialization.
    pub fn serialization_error() -> Self {
        GraphqlError::new("Undefined field serialization error", ErrorCode::SerializationError)
    }

    pub fn operation_cancelled() -> Self {
        GraphqlError::new("The operation was cancelled", ErrorCode::OperationCancelled)
    }

    pub fn internal_server_error() -> Self {
        GraphqlError::new("Internal server error", ErrorCode::InternalServerError)
    }
}

impl std::fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(f)
    }
}

impl serde::Serialize for GraphqlError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &self.message)?;
        if !self.locations.is_empty() {
            map.serialize_entry("locations", &self.locations)?;
        }
        if let Some(path) = &self.path {
            map.serialize_entry("path", path)?;
        }
        map.serialize_entry("extensions", &SerializableExtensions(self))?;
        map.end()
    }
}

struct SerializableExtensions<'a>(&'a GraphqlError);

impl serde::Serialize for SerializableExtensions<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.extensions.len() + 1))?;
        for (key, value) in &self.0.extensions {
            if key != "code" {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("code", &self.0.code)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use operation::ResponseKey;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serialization() {
        let error = GraphqlError::non_null_violation("Droid", "name")
            .with_location(Location::new(3, 7))
            .with_path((ResponseKey::from("hero"), ResponseKey::from("friends"), 2usize))
            .with_extension("retryable", false);

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "message": "Cannot return null for non-nullable field Droid.name",
                "locations": [{"line": 3, "column": 7}],
                "path": ["hero", "friends", 2],
                "extensions": {"retryable": false, "code": "NON_NULL_VIOLATION"}
            })
        );
    }

    #[test]
    fn minimal_serialization() {
        assert_eq!(
            serde_json::to_value(GraphqlError::serialization_error()).unwrap(),
            json!({
                "message": "Undefined field serialization error",
                "extensions": {"code": "SERIALIZATION_ERROR"}
            })
        );
    }
}
