use std::{any::Any, fmt};

use crate::ResolvedValue;

/// Reference to an object returned by a resolver.
pub trait ResolvedObject: fmt::Debug + Send + Sync {
    /// Name of the runtime representation, reported when no object type can be determined.
    fn runtime_type_name(&self) -> &str;

    /// The GraphQL object type this value claims to be, if it knows.
    fn typename(&self) -> Option<&str> {
        None
    }

    /// Property lookup used by the default field resolver.
    fn field(&self, name: &str) -> Option<ResolvedValue> {
        let _ = name;
        None
    }

    fn to_json(&self) -> Option<serde_json::Value> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// A JSON object, `__typename` is used as the object type hint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject(serde_json::Map<String, serde_json::Value>);

impl JsonObject {
    pub fn new(map: serde_json::Map<String, serde_json::Value>) -> Self {
        JsonObject(map)
    }
}

impl ResolvedObject for JsonObject {
    fn runtime_type_name(&self) -> &str {
        "JsonObject"
    }

    fn typename(&self) -> Option<&str> {
        self.0.get("__typename").and_then(serde_json::Value::as_str)
    }

    fn field(&self, name: &str) -> Option<ResolvedValue> {
        self.0.get(name).cloned().map(Into::into)
    }

    fn to_json(&self) -> Option<serde_json::Value> {
        Some(serde_json::Value::Object(self.0.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
