use error::{ErrorCode, GraphqlError};

use crate::ResponseValue;

use super::CompletionContext;

/// Determines the object type of the value and schedules the completion of its fields.
pub(super) fn complete(ctx: CompletionContext<'_, '_>) {
    let schema = ctx.schema();
    let declared_type = ctx.ty().definition_id;

    let message = match schema.resolve_concrete_type(declared_type, ctx.sources(), ctx.value()) {
        Some(object_id) if schema.object(object_id).is_some() && schema.is_possible_type(declared_type, object_id) => {
            ctx.complete_object(object_id);
            return;
        }
        Some(object_id) if schema.get(object_id).is_some() => format!(
            "Type `{}` resolved for a value of type `{}` is not a possible type of `{}`",
            schema[object_id].name(),
            ctx.value().runtime_type_name(),
            schema[declared_type].name()
        ),
        _ => format!(
            "Could not resolve the concrete type of `{}` for a value of type `{}`",
            schema[declared_type].name(),
            ctx.value().runtime_type_name()
        ),
    };

    ctx.report(GraphqlError::new(message, ErrorCode::TypeResolutionError));
    ctx.integrate(ResponseValue::Null);
}
