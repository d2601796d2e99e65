use std::fmt;

use value::{LeafValue, ResolvedValue, RuntimeKind, ValueKind};

/// -2^63, exactly representable as a float unlike `i64::MAX`.
const I64_MIN: f64 = i64::MIN as f64;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The value cannot be converted, the message is reported to the client as is.
    #[error("{0}")]
    InvalidArgument(String),
    #[error("No conversion from {from} to {to}")]
    Unsupported { from: ValueKind, to: RuntimeKind },
}

/// Converts resolved values into the representation expected by a leaf type before it is
/// serialized.
pub trait TypeConverter: Send + Sync {
    fn convert(&self, from: ValueKind, to: RuntimeKind, value: ResolvedValue) -> Result<LeafValue, ConversionError>;
}

/// Parses strings into numbers and booleans, converts losslessly between integers and floats,
/// and formats scalars as strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeConverter;

impl TypeConverter for DefaultTypeConverter {
    fn convert(&self, from: ValueKind, to: RuntimeKind, value: ResolvedValue) -> Result<LeafValue, ConversionError> {
        match (to, value) {
            (RuntimeKind::Int, ResolvedValue::String(s)) => {
                s.trim().parse().map(LeafValue::Int).map_err(|_| invalid(&s, to))
            }
            (RuntimeKind::Int, ResolvedValue::Float(n)) => {
                if n.fract() == 0.0 && (I64_MIN..-I64_MIN).contains(&n) {
                    Ok(LeafValue::Int(n as i64))
                } else {
                    Err(invalid(n, to))
                }
            }
            (RuntimeKind::Float, ResolvedValue::Int(n)) => Ok(LeafValue::Float(n as f64)),
            (RuntimeKind::Float, ResolvedValue::String(s)) => {
                s.trim().parse().map(LeafValue::Float).map_err(|_| invalid(&s, to))
            }
            (RuntimeKind::Boolean, ResolvedValue::String(s)) => match s.as_str() {
                "true" => Ok(LeafValue::Boolean(true)),
                "false" => Ok(LeafValue::Boolean(false)),
                _ => Err(invalid(&s, to)),
            },
            (RuntimeKind::String, ResolvedValue::Int(n)) => Ok(LeafValue::String(n.to_string())),
            (RuntimeKind::String, ResolvedValue::Float(n)) => Ok(LeafValue::String(n.to_string())),
            (RuntimeKind::String, ResolvedValue::Boolean(b)) => Ok(LeafValue::String(b.to_string())),
            (to, _) => Err(ConversionError::Unsupported { from, to }),
        }
    }
}

fn invalid(value: impl fmt::Display, to: RuntimeKind) -> ConversionError {
    ConversionError::InvalidArgument(format!("Cannot coerce `{value}` to {to}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn convert(to: RuntimeKind, value: impl Into<ResolvedValue>) -> Result<LeafValue, String> {
        let value = value.into();
        DefaultTypeConverter
            .convert(value.kind(), to, value)
            .map_err(|err| err.to_string())
    }

    #[test]
    fn parses_strings() {
        assert_eq!(convert(RuntimeKind::Int, " 42 "), Ok(LeafValue::Int(42)));
        assert_eq!(convert(RuntimeKind::Float, "1.5"), Ok(LeafValue::Float(1.5)));
        assert_eq!(convert(RuntimeKind::Boolean, "true"), Ok(LeafValue::Boolean(true)));
        assert_eq!(
            convert(RuntimeKind::Int, "forty-two"),
            Err("Cannot coerce `forty-two` to Int".to_string())
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(convert(RuntimeKind::Int, 3.0), Ok(LeafValue::Int(3)));
        assert_eq!(convert(RuntimeKind::Int, 3.5), Err("Cannot coerce `3.5` to Int".to_string()));
        assert_eq!(convert(RuntimeKind::Float, 3), Ok(LeafValue::Float(3.0)));
        assert_eq!(convert(RuntimeKind::Int, -(2f64.powi(63))), Ok(LeafValue::Int(i64::MIN)));
        assert_eq!(
            convert(RuntimeKind::Int, 2f64.powi(63)),
            Err("Cannot coerce `9223372036854775808` to Int".to_string())
        );
        assert_eq!(convert(RuntimeKind::String, 7), Ok(LeafValue::String("7".into())));
    }

    #[test]
    fn unsupported() {
        let err = DefaultTypeConverter
            .convert(ValueKind::List, RuntimeKind::Int, ResolvedValue::List(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
        assert_eq!(err.to_string(), "No conversion from List to Int");
    }
}
