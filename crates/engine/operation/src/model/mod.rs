mod location;
mod response_key;
mod selection_set;

use indexmap::IndexMap;

pub use location::*;
pub use response_key::*;
pub use selection_set::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub ty: OperationType,
    pub name: Option<String>,
    pub selection_set: SelectionSet,
    pub fragments: IndexMap<String, FragmentDefinition>,
}

#[derive(Debug, Clone)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub selection_set: SelectionSet,
}

impl Operation {
    pub fn query(selections: impl IntoIterator<Item = Selection>) -> Self {
        Self::new(OperationType::Query, selections)
    }

    pub fn mutation(selections: impl IntoIterator<Item = Selection>) -> Self {
        Self::new(OperationType::Mutation, selections)
    }

    fn new(ty: OperationType, selections: impl IntoIterator<Item = Selection>) -> Self {
        Operation {
            ty,
            name: None,
            selection_set: selections.into_iter().collect(),
            fragments: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_fragment(
        mut self,
        name: impl Into<String>,
        type_condition: impl Into<String>,
        selections: impl IntoIterator<Item = Selection>,
    ) -> Self {
        let name = name.into();
        self.fragments.insert(
            name.clone(),
            FragmentDefinition {
                name,
                type_condition: type_condition.into(),
                selection_set: selections.into_iter().collect(),
            },
        );
        self
    }
}
