use crate::ResolvedValue;

/// Runtime representation expected by a leaf type's serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RuntimeKind {
    Boolean,
    Int,
    Float,
    String,
    Json,
}

/// A resolved value normalized to a [`RuntimeKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl LeafValue {
    pub fn kind(&self) -> RuntimeKind {
        match self {
            LeafValue::Boolean(_) => RuntimeKind::Boolean,
            LeafValue::Int(_) => RuntimeKind::Int,
            LeafValue::Float(_) => RuntimeKind::Float,
            LeafValue::String(_) => RuntimeKind::String,
            LeafValue::Json(_) => RuntimeKind::Json,
        }
    }
}

impl ResolvedValue {
    /// Succeeds only if the value already is an instance of `kind`, the value is handed back
    /// otherwise so that it can go through conversion.
    pub fn into_leaf(self, kind: RuntimeKind) -> Result<LeafValue, ResolvedValue> {
        match (kind, self) {
            (RuntimeKind::Boolean, ResolvedValue::Boolean(b)) => Ok(LeafValue::Boolean(b)),
            (RuntimeKind::Int, ResolvedValue::Int(n)) => Ok(LeafValue::Int(n)),
            (RuntimeKind::Float, ResolvedValue::Float(n)) => Ok(LeafValue::Float(n)),
            (RuntimeKind::String, ResolvedValue::String(s)) => Ok(LeafValue::String(s)),
            (RuntimeKind::Json, value) => match value.to_json() {
                Some(json) => Ok(LeafValue::Json(json)),
                None => Err(value),
            },
            (_, value) => Err(value),
        }
    }
}
