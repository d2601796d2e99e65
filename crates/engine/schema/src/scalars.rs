use value::{LeafValue, RuntimeKind};

/// Serialization capability of scalars and enums.
pub trait LeafSerializer: Send + Sync {
    /// Representation `serialize` expects its input in.
    fn runtime_kind(&self) -> RuntimeKind;

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// The value cannot be represented by the type, the message is meant for clients.
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl SerializeError {
    fn unexpected(value: &LeafValue, expected: RuntimeKind) -> Self {
        SerializeError::Internal(format!("expected a {expected} value, received a {}", value.kind()).into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntScalar;

impl LeafSerializer for IntScalar {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::Int
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        match value {
            LeafValue::Int(n) => i32::try_from(n).map(Into::into).map_err(|_| {
                SerializeError::InvalidInput(format!("Int cannot represent non 32-bit signed integer value: {n}"))
            }),
            other => Err(SerializeError::unexpected(&other, RuntimeKind::Int)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FloatScalar;

impl LeafSerializer for FloatScalar {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::Float
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        match value {
            LeafValue::Float(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| SerializeError::InvalidInput(format!("Float cannot represent non numeric value: {n}"))),
            other => Err(SerializeError::unexpected(&other, RuntimeKind::Float)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringScalar;

impl LeafSerializer for StringScalar {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::String
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        match value {
            LeafValue::String(s) => Ok(serde_json::Value::String(s)),
            other => Err(SerializeError::unexpected(&other, RuntimeKind::String)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanScalar;

impl LeafSerializer for BooleanScalar {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::Boolean
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        match value {
            LeafValue::Boolean(b) => Ok(serde_json::Value::Bool(b)),
            other => Err(SerializeError::unexpected(&other, RuntimeKind::Boolean)),
        }
    }
}

/// IDs are serialized as strings, integer identifiers are converted beforehand.
#[derive(Debug, Clone, Copy)]
pub struct IdScalar;

impl LeafSerializer for IdScalar {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::String
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        StringScalar.serialize(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JsonScalar;

impl LeafSerializer for JsonScalar {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::Json
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        match value {
            LeafValue::Json(json) => Ok(json),
            other => Err(SerializeError::unexpected(&other, RuntimeKind::Json)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumSerializer {
    name: String,
    values: Vec<String>,
}

impl EnumSerializer {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        EnumSerializer {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl LeafSerializer for EnumSerializer {
    fn runtime_kind(&self) -> RuntimeKind {
        RuntimeKind::String
    }

    fn serialize(&self, value: LeafValue) -> Result<serde_json::Value, SerializeError> {
        match value {
            LeafValue::String(s) if self.values.contains(&s) => Ok(serde_json::Value::String(s)),
            LeafValue::String(s) => Err(SerializeError::InvalidInput(format!(
                "Enum `{}` cannot represent value: \"{s}\"",
                self.name
            ))),
            other => Err(SerializeError::unexpected(&other, RuntimeKind::String)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn int_is_32_bits() {
        assert_eq!(IntScalar.serialize(LeafValue::Int(42)).unwrap(), json!(42));

        let err = IntScalar.serialize(LeafValue::Int(1 << 40)).unwrap_err();
        assert!(matches!(err, SerializeError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "Int cannot represent non 32-bit signed integer value: 1099511627776"
        );
    }

    #[test]
    fn float_must_be_finite() {
        assert_eq!(FloatScalar.serialize(LeafValue::Float(1.5)).unwrap(), json!(1.5));
        assert!(matches!(
            FloatScalar.serialize(LeafValue::Float(f64::INFINITY)),
            Err(SerializeError::InvalidInput(_))
        ));
    }

    #[test]
    fn unexpected_representation_is_internal() {
        let err = StringScalar.serialize(LeafValue::Int(1)).unwrap_err();
        assert!(matches!(err, SerializeError::Internal(_)));
        assert_eq!(err.to_string(), "expected a String value, received a Int");
    }

    #[test]
    fn enum_rejects_unknown_values() {
        let serializer = EnumSerializer::new("Episode", ["NEWHOPE", "EMPIRE"]);
        assert_eq!(
            serializer.serialize(LeafValue::String("EMPIRE".into())).unwrap(),
            json!("EMPIRE")
        );
        assert_eq!(
            serializer
                .serialize(LeafValue::String("PHANTOM".into()))
                .unwrap_err()
                .to_string(),
            "Enum `Episode` cannot represent value: \"PHANTOM\""
        );
    }
}
