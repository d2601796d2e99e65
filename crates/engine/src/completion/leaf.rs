use error::{ErrorCode, GraphqlError};
use schema::SerializeError;

use crate::{ConversionError, ResponseValue};

use super::CompletionContext;

/// Serializes a scalar or enum value, converting it first if it isn't already in the runtime
/// representation expected by the type's serializer.
pub(super) fn complete(mut ctx: CompletionContext<'_, '_>) {
    let definition = &ctx.schema()[ctx.ty().definition_id];
    let Some(serializer) = definition.leaf_serializer() else {
        ctx.report(GraphqlError::new(
            "Scalar types and enum types must be serializable",
            ErrorCode::SerializationError,
        ));
        ctx.integrate(ResponseValue::Null);
        return;
    };

    let kind = serializer.runtime_kind();
    let leaf = match ctx.take_value().into_leaf(kind) {
        Ok(leaf) => leaf,
        Err(value) => match ctx.converter().convert(value.kind(), kind, value) {
            Ok(leaf) => leaf,
            Err(ConversionError::InvalidArgument(message)) => {
                ctx.report(GraphqlError::new(message, ErrorCode::SerializationError));
                ctx.integrate(ResponseValue::Null);
                return;
            }
            Err(err) => {
                tracing::warn!(path = %ctx.path(), leaf_type = definition.name(), "failed to convert leaf value: {err}");
                ctx.report(GraphqlError::serialization_error());
                ctx.integrate(ResponseValue::Null);
                return;
            }
        },
    };

    match serializer.serialize(leaf) {
        Ok(value) => ctx.integrate(ResponseValue::Leaf(value)),
        Err(SerializeError::InvalidInput(message)) => {
            ctx.report(GraphqlError::new(message, ErrorCode::SerializationError));
            ctx.integrate(ResponseValue::Null);
        }
        Err(err) => {
            tracing::warn!(path = %ctx.path(), leaf_type = definition.name(), "failed to serialize leaf value: {err}");
            ctx.report(GraphqlError::serialization_error());
            ctx.integrate(ResponseValue::Null);
        }
    }
}
