use std::sync::Arc;

use error::{ErrorCode, GraphqlError};
use operation::{CollectedField, Location, Operation, OperationType, collect_fields};
use schema::{DefinitionId, Schema};
use value::{ResolvedValue, SourceStack};

use crate::{
    CancellationToken, CompletionConfig, CompletionContext, DefaultTypeConverter, Response, ResponseErrors,
    ResponseObject, ResponsePath, ResponseValue, TypeConverter, ValueCompleter,
};

use super::{ExecutionContext, FieldResolver, FieldTask, ResolverContext, StageQueue, TaskScheduler};

/// Executes an operation stage by stage: every stage resolves and completes the fields
/// scheduled by the previous one, so the response is materialized breadth-first.
pub struct Executor<'a, R> {
    schema: &'a Schema,
    operation: &'a Operation,
    resolver: R,
    converter: Box<dyn TypeConverter>,
    config: CompletionConfig,
    cancellation: CancellationToken,
}

impl<'a, R: FieldResolver> Executor<'a, R> {
    pub fn new(schema: &'a Schema, operation: &'a Operation, resolver: R) -> Self {
        Executor {
            schema,
            operation,
            resolver,
            converter: Box::new(DefaultTypeConverter),
            config: CompletionConfig::default(),
            cancellation: CancellationToken::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_converter(mut self, converter: impl TypeConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub async fn execute(&self, root_value: ResolvedValue) -> Response {
        let root_type = match self.operation.ty {
            OperationType::Query => Some(self.schema.query_type()),
            OperationType::Mutation => self.schema.mutation_type(),
        };
        let Some(root_type) = root_type else {
            return Response::from_errors(vec![GraphqlError::new(
                format!("The schema does not support {} operations", self.operation.ty),
                ErrorCode::BadRequest,
            )]);
        };

        let errors = ResponseErrors::default();
        let queue = StageQueue::default();
        let ctx = ExecutionContext {
            schema: self.schema,
            operation: self.operation,
            converter: self.converter.as_ref(),
            config: &self.config,
            errors: &errors,
            scheduler: &queue,
            cancellation: &self.cancellation,
        };

        let fields = collect_fields(self.schema, self.operation, root_type, [&self.operation.selection_set]);
        let root = Arc::new(ResponseObject::new(
            root_type,
            fields
                .iter()
                .map(|field| (field.response_key.clone(), slot_is_nullable(self.schema, root_type, field))),
        ));
        let sources = SourceStack::new(root_value);
        let root_tasks = fields.into_iter().enumerate().map(|(slot, field)| FieldTask {
            parent_type: root_type,
            path: ResponsePath::default().child(field.response_key.clone()),
            sources: sources.clone(),
            object: root.clone(),
            slot,
            field,
        });

        let mut stage = 0;
        match self.operation.ty {
            OperationType::Query => {
                for task in root_tasks {
                    queue.enqueue(task);
                }
                self.run_stages(ctx, &queue, &mut stage).await;
            }
            // Each mutation root field, sub-selections included, completes before the next starts.
            OperationType::Mutation => {
                for task in root_tasks {
                    queue.enqueue(task);
                    if !self.run_stages(ctx, &queue, &mut stage).await {
                        break;
                    }
                }
            }
        }

        Response::new(&root, errors.into_vec())
    }

    /// Runs stages until the queue is empty. Returns `false` if execution stopped early, after
    /// reporting why.
    async fn run_stages(&self, ctx: ExecutionContext<'_, 'a>, queue: &StageQueue<'a>, stage: &mut usize) -> bool {
        let mut depth = 0;
        loop {
            let tasks = queue.drain();
            if tasks.is_empty() {
                return true;
            }
            if ctx.is_cancelled() {
                tracing::debug!(stage = *stage, pending = tasks.len(), "execution cancelled");
                ctx.push_error(GraphqlError::operation_cancelled());
                return false;
            }
            if let Some(max_stages) = self.config.max_stages.filter(|max| depth >= max.get()) {
                tracing::debug!(stage = *stage, pending = tasks.len(), "maximum number of stages reached");
                ctx.push_error(GraphqlError::new(
                    format!("Execution exceeded the maximum of {max_stages} stages"),
                    ErrorCode::LimitExceeded,
                ));
                return false;
            }

            depth += 1;
            *stage += 1;
            tracing::debug!(stage = *stage, fields = tasks.len(), "executing stage");
            futures::future::join_all(tasks.into_iter().map(|task| self.execute_field(ctx, task))).await;
        }
    }

    async fn execute_field(&self, ctx: ExecutionContext<'_, 'a>, task: FieldTask<'a>) {
        let Some(parent) = ctx.schema.object(task.parent_type) else {
            unreachable!("fields are only scheduled on object types");
        };

        if task.field.name == "__typename" {
            let typename = serde_json::Value::String(parent.name.clone());
            task.object.write(task.slot, ResponseValue::Leaf(typename));
            return;
        }

        let Some(definition) = parent.fields.get(task.field.name) else {
            ctx.push_error(
                GraphqlError::new(
                    format!("Cannot query field \"{}\" on type \"{}\"", task.field.name, parent.name),
                    ErrorCode::FieldNotFound,
                )
                .with_path(&task.path)
                .with_locations(error_locations(&task.field)),
            );
            task.object.write(task.slot, ResponseValue::Null);
            return;
        };

        let value = self
            .resolver
            .resolve(ResolverContext {
                schema: ctx.schema,
                parent_type: parent,
                field: definition,
                selection: task.field.selection(),
                path: &task.path,
                sources: &task.sources,
            })
            .await;

        tracing::trace!(path = %task.path, kind = %value.kind(), "completing field");
        ValueCompleter.complete(CompletionContext::for_field(ctx, &task, definition.ty, value));
    }
}

/// Nullability of the response slot of a field, `__typename` is a `String!`. Unknown fields
/// are nullable, they are reported and written as null.
pub(crate) fn slot_is_nullable(schema: &Schema, object_id: DefinitionId, field: &CollectedField<'_>) -> bool {
    if field.name == "__typename" {
        return false;
    }
    schema[object_id]
        .field(field.name)
        .is_none_or(|definition| !definition.ty.is_non_null())
}

/// Locations of the selections of a field, unknown ones are left out.
pub(crate) fn error_locations<'a>(field: &'a CollectedField<'_>) -> impl Iterator<Item = Location> + 'a {
    field.locations().filter(|location| *location != Location::default())
}
