mod composite;
mod context;
mod errors;
mod leaf;
mod list;
mod target;


use schema::TypeShape;

use crate::ResponseValue;

pub use context::*;
pub use target::*;

/// Ways of completing a value. A value is completed by the first strategy matching it, in
/// the order of [`STRATEGIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// The value is an error or a list made only of errors.
    Error,
    /// Strips the non-null wrapper and continues with the following strategies.
    NonNull,
    Null,
    List,
    /// Scalars and enums.
    Leaf,
    /// Objects, interfaces and unions.
    Composite,
}

const STRATEGIES: [Strategy; 6] = [
    Strategy::Error,
    Strategy::NonNull,
    Strategy::Null,
    Strategy::List,
    Strategy::Leaf,
    Strategy::Composite,
];

impl Strategy {
    fn matches(self, ctx: &CompletionContext<'_, '_>) -> bool {
        match self {
            Strategy::Error => ctx.value().is_error(),
            Strategy::NonNull => ctx.ty().shape() == TypeShape::NonNull,
            Strategy::Null => ctx.value().is_null(),
            Strategy::List => ctx.ty().shape() == TypeShape::List,
            Strategy::Leaf => ctx.schema()[ctx.ty().definition_id].is_leaf(),
            Strategy::Composite => ctx.schema()[ctx.ty().definition_id].is_composite(),
        }
    }
}

/// Completes resolved values into the response.
///
/// Completion never suspends: nested objects are written empty and their fields are handed to
/// the scheduler of the execution context.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueCompleter;

impl ValueCompleter {
    pub fn complete(&self, ctx: CompletionContext<'_, '_>) {
        self.complete_from(0, ctx)
    }

    fn complete_from(&self, start: usize, ctx: CompletionContext<'_, '_>) {
        let Some(index) = (start..STRATEGIES.len()).find(|&index| STRATEGIES[index].matches(&ctx)) else {
            unreachable!(
                "no completion strategy for a {} value of type {}",
                ctx.value().kind(),
                ctx.schema().type_display(ctx.ty())
            );
        };

        match STRATEGIES[index] {
            Strategy::Error => errors::complete(ctx),
            Strategy::NonNull => self.complete_from(index + 1, ctx.into_non_null()),
            Strategy::Null => ctx.integrate(ResponseValue::Null),
            Strategy::List => list::complete(self, ctx),
            Strategy::Leaf => leaf::complete(ctx),
            Strategy::Composite => composite::complete(ctx),
        }
    }
}
