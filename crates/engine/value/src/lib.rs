mod error;
mod leaf;
mod object;
mod source;

use std::sync::Arc;

pub use error::*;
pub use leaf::*;
pub use object::*;
pub use source::*;

/// Raw output of a field resolver, before it is completed against the field's declared type.
#[derive(Debug, Clone, Default)]
pub enum ResolvedValue {
    #[default]
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ResolvedValue>),
    Object(Arc<dyn ResolvedObject>),
    Error(FieldError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ValueKind {
    Null,
    Boolean,
    Int,
    Float,
    String,
    List,
    Object,
    Error,
}

impl ResolvedValue {
    pub fn object(object: impl ResolvedObject + 'static) -> Self {
        ResolvedValue::Object(Arc::new(object))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ResolvedValue::Null => ValueKind::Null,
            ResolvedValue::Boolean(_) => ValueKind::Boolean,
            ResolvedValue::Int(_) => ValueKind::Int,
            ResolvedValue::Float(_) => ValueKind::Float,
            ResolvedValue::String(_) => ValueKind::String,
            ResolvedValue::List(_) => ValueKind::List,
            ResolvedValue::Object(_) => ValueKind::Object,
            ResolvedValue::Error(_) => ValueKind::Error,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedValue::Null)
    }

    /// Name of the runtime type, used in error messages.
    pub fn runtime_type_name(&self) -> String {
        match self {
            ResolvedValue::Object(object) => object.runtime_type_name().to_string(),
            other => other.kind().to_string(),
        }
    }

    /// Whether this value is an error or a non-empty list made only of errors.
    pub fn is_error(&self) -> bool {
        match self {
            ResolvedValue::Error(_) => true,
            ResolvedValue::List(items) => {
                !items.is_empty() && items.iter().all(|item| matches!(item, ResolvedValue::Error(_)))
            }
            _ => false,
        }
    }

    /// The errors carried by this value, if it is an error or a non-empty list made only of
    /// errors.
    pub fn as_errors(&self) -> Option<Vec<&FieldError>> {
        match self {
            ResolvedValue::Error(error) => Some(vec![error]),
            ResolvedValue::List(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    ResolvedValue::Error(error) => Some(error),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Option<serde_json::Value> {
        Some(match self {
            ResolvedValue::Null => serde_json::Value::Null,
            ResolvedValue::Boolean(b) => serde_json::Value::Bool(*b),
            ResolvedValue::Int(n) => serde_json::Value::from(*n),
            ResolvedValue::Float(n) => serde_json::Value::Number(serde_json::Number::from_f64(*n)?),
            ResolvedValue::String(s) => serde_json::Value::String(s.clone()),
            ResolvedValue::List(items) => {
                serde_json::Value::Array(items.iter().map(ResolvedValue::to_json).collect::<Option<_>>()?)
            }
            ResolvedValue::Object(object) => object.to_json()?,
            ResolvedValue::Error(_) => return None,
        })
    }
}

impl From<serde_json::Value> for ResolvedValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ResolvedValue::Null,
            serde_json::Value::Bool(b) => ResolvedValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(n) => ResolvedValue::Int(n),
                None => ResolvedValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ResolvedValue::String(s),
            serde_json::Value::Array(items) => ResolvedValue::List(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => ResolvedValue::object(JsonObject::new(map)),
        }
    }
}

impl From<bool> for ResolvedValue {
    fn from(value: bool) -> Self {
        ResolvedValue::Boolean(value)
    }
}

impl From<i64> for ResolvedValue {
    fn from(value: i64) -> Self {
        ResolvedValue::Int(value)
    }
}

impl From<i32> for ResolvedValue {
    fn from(value: i32) -> Self {
        ResolvedValue::Int(value.into())
    }
}

impl From<f64> for ResolvedValue {
    fn from(value: f64) -> Self {
        ResolvedValue::Float(value)
    }
}

impl From<&str> for ResolvedValue {
    fn from(value: &str) -> Self {
        ResolvedValue::String(value.to_string())
    }
}

impl From<String> for ResolvedValue {
    fn from(value: String) -> Self {
        ResolvedValue::String(value)
    }
}

impl From<FieldError> for ResolvedValue {
    fn from(error: FieldError) -> Self {
        ResolvedValue::Error(error)
    }
}

impl<T: Into<ResolvedValue>> From<Option<T>> for ResolvedValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl<T: Into<ResolvedValue>> From<Vec<T>> for ResolvedValue {
    fn from(values: Vec<T>) -> Self {
        ResolvedValue::List(values.into_iter().map(Into::into).collect())
    }
}
