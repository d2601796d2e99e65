use error::GraphqlError;
use operation::Operation;
use schema::Schema;

use crate::{CancellationToken, CompletionConfig, ResponseErrors, TypeConverter};

use super::TaskScheduler;

/// Everything completion needs from the request being executed. `'op` is the lifetime of the
/// operation the scheduled tasks refer to.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'ctx, 'op> {
    pub schema: &'ctx Schema,
    pub operation: &'op Operation,
    pub converter: &'ctx dyn TypeConverter,
    pub config: &'ctx CompletionConfig,
    pub errors: &'ctx ResponseErrors,
    pub scheduler: &'ctx dyn TaskScheduler<'op>,
    pub cancellation: &'ctx CancellationToken,
}

impl ExecutionContext<'_, '_> {
    pub fn push_error(&self, error: GraphqlError) {
        tracing::trace!(code = %error.code, "{}", error.message);
        self.errors.push(error);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
