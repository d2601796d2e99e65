use wrapping::Wrapping;

use crate::DefinitionId;

/// An output type: a named definition and its List and Non-Null wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type {
    pub definition_id: DefinitionId,
    pub wrapping: Wrapping,
}

/// The outermost layer of a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    NonNull,
    List,
    Named,
}

impl Type {
    pub fn new(definition_id: DefinitionId, wrapping: Wrapping) -> Self {
        Type { definition_id, wrapping }
    }

    pub fn shape(self) -> TypeShape {
        if self.wrapping.is_required() {
            TypeShape::NonNull
        } else if self.wrapping.is_list() {
            TypeShape::List
        } else {
            TypeShape::Named
        }
    }

    pub fn is_non_null(self) -> bool {
        self.wrapping.is_required()
    }

    #[must_use]
    pub fn without_non_null(self) -> Self {
        Type {
            wrapping: self.wrapping.without_required(),
            ..self
        }
    }

    /// Element type of the outermost list.
    pub fn list_element(self) -> Option<Self> {
        let mut wrapping = self.wrapping;
        wrapping.pop_list_wrapping()?;
        Some(Type { wrapping, ..self })
    }
}
