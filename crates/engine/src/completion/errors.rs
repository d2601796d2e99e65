use crate::ResponseValue;

use super::CompletionContext;

/// Reports each error carried by the value and completes it as null.
pub(super) fn complete(ctx: CompletionContext<'_, '_>) {
    if let Some(errors) = ctx.value().as_errors() {
        for error in errors {
            ctx.report_field_error(error);
        }
    }
    ctx.integrate(ResponseValue::Null);
}
