mod builder;
mod definition;
mod resolve;
mod scalars;
mod ty;

use std::ops::Index;

use indexmap::IndexMap;
use value::{ResolvedValue, SourceStack};

pub use builder::*;
pub use definition::*;
pub use resolve::*;
pub use scalars::*;
pub use ty::*;
pub use wrapping::{ListWrapping, Wrapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefinitionId(u32);

impl DefinitionId {
    fn new(index: usize) -> Self {
        DefinitionId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct Schema {
    definitions: Vec<Definition>,
    definitions_by_name: IndexMap<String, DefinitionId>,
    query: DefinitionId,
    mutation: Option<DefinitionId>,
}

impl Index<DefinitionId> for Schema {
    type Output = Definition;

    fn index(&self, id: DefinitionId) -> &Self::Output {
        &self.definitions[id.index()]
    }
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn query_type(&self) -> DefinitionId {
        self.query
    }

    pub fn mutation_type(&self) -> Option<DefinitionId> {
        self.mutation
    }

    pub fn definition_by_name(&self, name: &str) -> Option<DefinitionId> {
        self.definitions_by_name.get(name).copied()
    }

    pub fn definitions(&self) -> impl Iterator<Item = (DefinitionId, &Definition)> + '_ {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (DefinitionId::new(index), definition))
    }

    /// The definition with this id, if it belongs to this schema.
    pub fn get(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.index())
    }

    pub fn object(&self, id: DefinitionId) -> Option<&ObjectDefinition> {
        match self.get(id)? {
            Definition::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Whether `object_id` is `abstract_id` itself or one of its possible types.
    pub fn is_possible_type(&self, abstract_id: DefinitionId, object_id: DefinitionId) -> bool {
        abstract_id == object_id || self[abstract_id].possible_types().contains(&object_id)
    }

    /// Whether a fragment with the given type condition applies to objects of `object_id`.
    pub fn type_condition_applies(&self, type_condition: &str, object_id: DefinitionId) -> bool {
        self.definition_by_name(type_condition)
            .is_some_and(|condition| self.is_possible_type(condition, object_id))
    }

    /// Determines the object type of a value completed at an object, interface or union type.
    ///
    /// Abstract types use their type resolver if they have one, and the `__typename` hint of the
    /// value otherwise. The result is not checked against the possible types.
    pub fn resolve_concrete_type(
        &self,
        definition_id: DefinitionId,
        sources: &SourceStack,
        value: &ResolvedValue,
    ) -> Option<DefinitionId> {
        let definition = &self[definition_id];
        if let Definition::Object(_) = definition {
            return Some(definition_id);
        }

        if let Some(type_resolver) = definition.type_resolver() {
            let ctx = AbstractTypeContext {
                schema: self,
                abstract_type: definition_id,
                sources,
            };
            return type_resolver.resolve_concrete_type(ctx, value);
        }

        match value {
            ResolvedValue::Object(object) => object.typename().and_then(|name| self.definition_by_name(name)),
            _ => None,
        }
    }

    /// Parses a type reference such as `[Character!]` against this schema's definitions.
    pub fn parse_type(&self, ty: &str) -> Option<Type> {
        let (name, wrapping) = wrapping::parse_type(ty).ok()?;
        Some(Type::new(self.definition_by_name(name)?, wrapping))
    }

    pub fn type_display(&self, ty: Type) -> wrapping::TypeDisplay<'_> {
        ty.wrapping.type_display(self[ty.definition_id].name())
    }
}
