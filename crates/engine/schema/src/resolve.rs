use value::{ResolvedValue, SourceStack};

use crate::{DefinitionId, Schema};

pub struct AbstractTypeContext<'a> {
    pub schema: &'a Schema,
    /// The interface or union being resolved.
    pub abstract_type: DefinitionId,
    pub sources: &'a SourceStack,
}

/// Hook attached to an interface or union to determine the object type of a runtime value.
pub trait ResolveConcreteType: Send + Sync {
    fn resolve_concrete_type(&self, ctx: AbstractTypeContext<'_>, value: &ResolvedValue) -> Option<DefinitionId>;
}

impl<F> ResolveConcreteType for F
where
    F: Fn(AbstractTypeContext<'_>, &ResolvedValue) -> Option<DefinitionId> + Send + Sync,
{
    fn resolve_concrete_type(&self, ctx: AbstractTypeContext<'_>, value: &ResolvedValue) -> Option<DefinitionId> {
        self(ctx, value)
    }
}
