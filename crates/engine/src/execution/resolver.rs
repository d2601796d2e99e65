use std::future::Future;

use operation::FieldSelection;
use schema::{FieldDefinition, ObjectDefinition, Schema};
use value::{ResolvedValue, SourceStack};

use crate::ResponsePath;

pub struct ResolverContext<'a> {
    pub schema: &'a Schema,
    pub parent_type: &'a ObjectDefinition,
    pub field: &'a FieldDefinition,
    /// First selection of the field in the document.
    pub selection: &'a FieldSelection,
    pub path: &'a ResponsePath,
    pub sources: &'a SourceStack,
}

impl ResolverContext<'_> {
    /// The object the field is resolved on, the root value for root fields.
    pub fn parent(&self) -> Option<&ResolvedValue> {
        self.sources.peek()
    }

    pub fn argument(&self, name: &str) -> Option<&serde_json::Value> {
        self.selection.arguments.get(name)
    }
}

/// Produces the raw value of a field, which is then completed against the field's type.
pub trait FieldResolver {
    fn resolve<'a>(&'a self, ctx: ResolverContext<'a>) -> impl Future<Output = ResolvedValue> + 'a;
}

/// Reads the field from its parent object.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFieldResolver;

impl FieldResolver for DefaultFieldResolver {
    fn resolve<'a>(&'a self, ctx: ResolverContext<'a>) -> impl Future<Output = ResolvedValue> + 'a {
        let value = match ctx.parent() {
            Some(ResolvedValue::Object(object)) => object.field(&ctx.field.name).unwrap_or_default(),
            _ => ResolvedValue::Null,
        };
        std::future::ready(value)
    }
}

/// Resolves fields synchronously with a closure.
pub struct FnResolver<F>(F);

impl<F> FnResolver<F>
where
    F: Fn(ResolverContext<'_>) -> ResolvedValue,
{
    pub fn new(f: F) -> Self {
        FnResolver(f)
    }
}

impl<F> FieldResolver for FnResolver<F>
where
    F: Fn(ResolverContext<'_>) -> ResolvedValue,
{
    fn resolve<'a>(&'a self, ctx: ResolverContext<'a>) -> impl Future<Output = ResolvedValue> + 'a {
        std::future::ready((self.0)(ctx))
    }
}
