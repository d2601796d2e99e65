/// An error produced by a resolver in place of a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    /// Path reported to the client, defaults to the path of the field being completed.
    pub path: Option<Vec<PathSegment>>,
    pub extensions: Vec<(String, serde_json::Value)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        FieldError {
            message: message.into(),
            path: None,
            extensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path = Some(path.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extensions.push((key.into(), value.into()));
        self
    }
}

impl From<&str> for PathSegment {
    fn from(field: &str) -> Self {
        PathSegment::Field(field.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}
