use std::sync::OnceLock;

use crate::{ResponseObjectRef, ResponseValue};

/// Where a completed value is written.
#[derive(Debug)]
pub enum ResultTarget<'a> {
    /// Slot of a field in its parent object.
    ObjectField { object: ResponseObjectRef, slot: usize },
    /// Position in the list being completed.
    ListElement { list: &'a ListAccumulator, index: usize },
    Root(&'a RootSlot),
}

impl ResultTarget<'_> {
    pub(crate) fn write(self, value: ResponseValue) {
        match self {
            ResultTarget::ObjectField { object, slot } => object.write(slot, value),
            ResultTarget::ListElement { list, index } => list.set(index, value),
            ResultTarget::Root(root) => root.set(value),
        }
    }
}

/// Elements of a list, indexed by their position in the resolved value.
#[derive(Debug)]
pub struct ListAccumulator(Box<[OnceLock<ResponseValue>]>);

impl ListAccumulator {
    pub fn new(len: usize) -> Self {
        ListAccumulator((0..len).map(|_| OnceLock::new()).collect())
    }

    fn set(&self, index: usize, value: ResponseValue) {
        assert!(self.0[index].set(value).is_ok(), "list element {index} was completed twice");
    }

    pub fn into_values(self) -> Vec<ResponseValue> {
        self.0
            .into_vec()
            .into_iter()
            .map(|element| element.into_inner().unwrap_or(ResponseValue::Null))
            .collect()
    }
}

/// Destination of a value completed outside of any object.
#[derive(Debug, Default)]
pub struct RootSlot(OnceLock<ResponseValue>);

impl RootSlot {
    fn set(&self, value: ResponseValue) {
        assert!(self.0.set(value).is_ok(), "value was completed twice");
    }

    pub fn get(&self) -> Option<&ResponseValue> {
        self.0.get()
    }

    pub fn into_value(self) -> Option<ResponseValue> {
        self.0.into_inner()
    }
}
