mod errors;
mod object;
mod path;

use error::{ErrorCodeCounter, GraphqlError};
use serde::ser::SerializeMap;

pub use errors::*;
pub use object::*;
pub use path::*;

/// The GraphQL response: `data` is `None` when a null propagated up to the root.
#[derive(Debug)]
pub struct Response {
    data: Option<serde_json::Value>,
    errors: Vec<GraphqlError>,
}

impl Response {
    pub(crate) fn new(root: &ResponseObject, errors: Vec<GraphqlError>) -> Self {
        let data = object_to_json(root).ok();
        tracing::debug!(errors = errors.len(), has_data = data.is_some(), "response assembled");
        Response { data, errors }
    }

    pub(crate) fn from_errors(errors: Vec<GraphqlError>) -> Self {
        Response { data: None, errors }
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn errors(&self) -> &[GraphqlError] {
        &self.errors
    }

    pub fn error_code_counter(&self) -> ErrorCodeCounter {
        ErrorCodeCounter::from_errors(&self.errors)
    }
}

impl serde::Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("data", &self.data)?;
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        map.end()
    }
}

/// A null reached a non-null position and must propagate to the nearest nullable ancestor.
struct NullPropagation;

fn object_to_json(object: &ResponseObject) -> Result<serde_json::Value, NullPropagation> {
    let mut map = serde_json::Map::with_capacity(object.len());
    for field in object.fields() {
        // Fields left incomplete by a cancelled execution are null.
        let value = field.value().map(value_to_json).unwrap_or(Ok(serde_json::Value::Null));
        map.insert(field.key().to_string(), at_position(value, field.is_nullable())?);
    }
    Ok(serde_json::Value::Object(map))
}

fn value_to_json(value: &ResponseValue) -> Result<serde_json::Value, NullPropagation> {
    match value {
        ResponseValue::Null => Ok(serde_json::Value::Null),
        ResponseValue::Leaf(leaf) => Ok(leaf.clone()),
        ResponseValue::Object(object) => object_to_json(object),
        ResponseValue::List(list) => list
            .values
            .iter()
            .map(|value| at_position(value_to_json(value), list.element_is_nullable))
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array),
    }
}

fn at_position(
    value: Result<serde_json::Value, NullPropagation>,
    nullable: bool,
) -> Result<serde_json::Value, NullPropagation> {
    match value {
        Ok(serde_json::Value::Null) | Err(NullPropagation) if nullable => Ok(serde_json::Value::Null),
        Ok(serde_json::Value::Null) | Err(NullPropagation) => Err(NullPropagation),
        Ok(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use operation::ResponseKey;
    use pretty_assertions::assert_eq;
    use schema::SchemaBuilder;
    use serde_json::json;

    use super::*;

    fn object(fields: &[(&str, bool, ResponseValue)]) -> ResponseObjectRef {
        let mut builder = SchemaBuilder::new();
        builder.add_object("Query", &[], &[]);
        let query = builder.build().unwrap().query_type();

        let object = ResponseObject::new(
            query,
            fields.iter().map(|(key, nullable, _)| (ResponseKey::from(*key), *nullable)),
        );
        for (slot, (_, _, value)) in fields.iter().enumerate() {
            object.write(slot, value.clone());
        }
        Arc::new(object)
    }

    fn leaf(value: serde_json::Value) -> ResponseValue {
        ResponseValue::Leaf(value)
    }

    fn to_json(root: &ResponseObject) -> serde_json::Value {
        serde_json::to_value(Response::new(root, Vec::new())).unwrap()
    }

    #[test]
    fn null_propagates_to_nearest_nullable_field() {
        let droid = object(&[("id", false, leaf(json!("2001"))), ("name", false, ResponseValue::Null)]);
        let root = object(&[("hero", true, ResponseValue::Object(droid)), ("count", false, leaf(json!(1)))]);

        assert_eq!(to_json(&root), json!({"data": {"hero": null, "count": 1}}));
    }

    #[test]
    fn null_propagates_through_non_null_lists() {
        let droid = object(&[("name", false, ResponseValue::Null)]);
        let friends = ResponseValue::List(ResponseList {
            element_is_nullable: false,
            values: vec![ResponseValue::Object(droid)],
        });
        let hero = object(&[("friends", true, friends)]);

        assert_eq!(
            to_json(&object(&[("hero", true, ResponseValue::Object(hero.clone()))])),
            json!({"data": {"hero": {"friends": null}}})
        );

        let nullable_elements = ResponseValue::List(ResponseList {
            element_is_nullable: true,
            values: vec![ResponseValue::Null, leaf(json!(1))],
        });
        assert_eq!(
            to_json(&object(&[("ids", false, nullable_elements)])),
            json!({"data": {"ids": [null, 1]}})
        );
    }

    #[test]
    fn null_propagates_to_the_root() {
        let root = object(&[("hero", false, ResponseValue::Null)]);
        let response = Response::new(&root, vec![GraphqlError::non_null_violation("Query", "hero")]);

        assert_eq!(response.data(), None);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "data": null,
                "errors": [{
                    "message": "Cannot return null for non-nullable field Query.hero",
                    "extensions": {"code": "NON_NULL_VIOLATION"}
                }]
            })
        );
    }

    #[test]
    fn incomplete_fields_are_null() {
        let mut builder = SchemaBuilder::new();
        builder.add_object("Query", &[], &[]);
        let query = builder.build().unwrap().query_type();

        let root = ResponseObject::new(query, [(ResponseKey::from("a"), true), (ResponseKey::from("b"), true)]);
        root.write(1, leaf(json!(true)));
        assert!(!root.is_complete());
        assert_eq!(to_json(&root), json!({"data": {"a": null, "b": true}}));
    }

    #[test]
    #[should_panic(expected = "field `a` was completed twice")]
    fn slots_are_written_once() {
        let root = object(&[("a", true, ResponseValue::Null)]);
        root.write(0, ResponseValue::Null);
    }
}
