use std::sync::{Arc, OnceLock};

use operation::ResponseKey;
use schema::DefinitionId;

/// A completed value.
#[derive(Debug, Clone)]
pub enum ResponseValue {
    Null,
    Leaf(serde_json::Value),
    List(ResponseList),
    Object(ResponseObjectRef),
}

impl ResponseValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ResponseValue::Null)
    }
}

#[derive(Debug, Clone)]
pub struct ResponseList {
    pub element_is_nullable: bool,
    pub values: Vec<ResponseValue>,
}

pub type ResponseObjectRef = Arc<ResponseObject>;

/// An object of the response, with one write-once slot per collected field in selection
/// order. Sibling fields complete concurrently and each writes its own slot.
#[derive(Debug)]
pub struct ResponseObject {
    definition_id: DefinitionId,
    fields: Box<[ResponseObjectField]>,
}

#[derive(Debug)]
pub struct ResponseObjectField {
    key: ResponseKey,
    nullable: bool,
    value: OnceLock<ResponseValue>,
}

impl ResponseObject {
    pub fn new(definition_id: DefinitionId, fields: impl IntoIterator<Item = (ResponseKey, bool)>) -> Self {
        ResponseObject {
            definition_id,
            fields: fields
                .into_iter()
                .map(|(key, nullable)| ResponseObjectField {
                    key,
                    nullable,
                    value: OnceLock::new(),
                })
                .collect(),
        }
    }

    pub fn definition_id(&self) -> DefinitionId {
        self.definition_id
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &ResponseObjectField> + '_ {
        self.fields.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.fields
            .iter()
            .find(|field| &*field.key == key)
            .and_then(|field| field.value.get())
    }

    /// Whether every slot has been written.
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|field| field.value.get().is_some())
    }

    pub(crate) fn write(&self, slot: usize, value: ResponseValue) {
        let field = &self.fields[slot];
        assert!(field.value.set(value).is_ok(), "field `{}` was completed twice", field.key);
    }
}

impl ResponseObjectField {
    pub fn key(&self) -> &ResponseKey {
        &self.key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// `None` until the field has been completed.
    pub fn value(&self) -> Option<&ResponseValue> {
        self.value.get()
    }
}
