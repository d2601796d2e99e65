use error::{ErrorCode, GraphqlError};
use value::ResolvedValue;

use crate::{ResponseList, ResponseValue};

use super::{CompletionContext, ListAccumulator, ValueCompleter};

/// Completes each element of the list in order. A null element at a non-null element type
/// makes the whole list null.
pub(super) fn complete(completer: &ValueCompleter, mut ctx: CompletionContext<'_, '_>) {
    let Some(element_type) = ctx.ty().list_element() else {
        unreachable!("list strategy applied to a non-list type");
    };

    let elements = match ctx.take_value() {
        ResolvedValue::List(elements) => elements,
        value => {
            ctx.report(GraphqlError::new(
                format!(
                    "Expected an iterable value for list type {}, found a value of type {}",
                    ctx.schema().type_display(ctx.ty()),
                    value.runtime_type_name()
                ),
                ErrorCode::ListError,
            ));
            ctx.integrate(ResponseValue::Null);
            return;
        }
    };

    let check_interval = ctx.config().cancellation_check_interval.get();
    let accumulator = ListAccumulator::new(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if index > 0 && index % check_interval == 0 && ctx.is_cancelled() {
            tracing::debug!(path = %ctx.path(), index, "list completion cancelled");
            ctx.report(GraphqlError::operation_cancelled());
            ctx.integrate(ResponseValue::Null);
            return;
        }

        if element.is_null() && element_type.is_non_null() {
            ctx.report(GraphqlError::new(
                format!(
                    "List of type {} does not allow null elements",
                    ctx.schema().type_display(ctx.ty())
                ),
                ErrorCode::ListError,
            ));
            ctx.integrate(ResponseValue::Null);
            return;
        }

        completer.complete(ctx.list_element(index, element_type, element, &accumulator));
    }

    ctx.integrate(ResponseValue::List(ResponseList {
        element_is_nullable: !element_type.is_non_null(),
        values: accumulator.into_values(),
    }));
}
