use std::sync::Arc;

use error::{ErrorCode, ErrorPath, ErrorPathSegment, GraphqlError};
use operation::{CollectedField, collect_fields};
use schema::{DefinitionId, Schema, Type};
use value::{FieldError, PathSegment, ResolvedValue, SourceStack};

use crate::{
    CompletionConfig, ExecutionContext, FieldTask, ResponseObject, ResponseObjectRef, ResponsePath, ResponseValue,
    TypeConverter,
    execution::executor::{error_locations, slot_is_nullable},
};

use super::{ListAccumulator, ResultTarget, RootSlot};

/// A value to complete against a type, and where the result goes.
///
/// Contexts are never modified once built: stripping a non-null wrapper or descending into a
/// list element derives a new context. Integrating a result consumes the context.
pub struct CompletionContext<'ctx, 'op> {
    ctx: ExecutionContext<'ctx, 'op>,
    parent_type: DefinitionId,
    field: &'ctx CollectedField<'op>,
    value: ResolvedValue,
    ty: Type,
    is_nullable: bool,
    path: ResponsePath,
    sources: SourceStack,
    target: ResultTarget<'ctx>,
}

impl<'ctx, 'op> CompletionContext<'ctx, 'op> {
    /// Completion of the resolved value of a scheduled field, written into the field's slot.
    pub fn for_field(ctx: ExecutionContext<'ctx, 'op>, task: &'ctx FieldTask<'op>, ty: Type, value: ResolvedValue) -> Self {
        CompletionContext {
            ctx,
            parent_type: task.parent_type,
            field: &task.field,
            value,
            ty,
            is_nullable: true,
            path: task.path.clone(),
            sources: task.sources.clone(),
            target: ResultTarget::ObjectField {
                object: task.object.clone(),
                slot: task.slot,
            },
        }
    }

    /// Completion of a value of `field` outside of any response object.
    pub fn standalone(
        ctx: ExecutionContext<'ctx, 'op>,
        parent_type: DefinitionId,
        field: &'ctx CollectedField<'op>,
        ty: Type,
        value: ResolvedValue,
        slot: &'ctx RootSlot,
    ) -> Self {
        CompletionContext {
            ctx,
            parent_type,
            field,
            value,
            ty,
            is_nullable: true,
            path: ResponsePath::default().child(field.response_key.clone()),
            sources: SourceStack::default(),
            target: ResultTarget::Root(slot),
        }
    }

    pub fn value(&self) -> &ResolvedValue {
        &self.value
    }

    pub fn ty(&self) -> Type {
        self.ty
    }

    /// Whether null is acceptable at this position.
    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    pub fn sources(&self) -> &SourceStack {
        &self.sources
    }

    pub fn field(&self) -> &'ctx CollectedField<'op> {
        self.field
    }

    pub fn schema(&self) -> &'ctx Schema {
        self.ctx.schema
    }

    pub(crate) fn converter(&self) -> &'ctx dyn TypeConverter {
        self.ctx.converter
    }

    pub(crate) fn config(&self) -> &'ctx CompletionConfig {
        self.ctx.config
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.ctx.is_cancelled()
    }

    pub(crate) fn take_value(&mut self) -> ResolvedValue {
        std::mem::take(&mut self.value)
    }

    /// Writes the completed value to its target. A null at a non-null position is reported
    /// here, it is propagated to the nearest nullable ancestor when the response is assembled.
    pub fn integrate(self, value: ResponseValue) {
        if value.is_null() && !self.is_nullable {
            let parent_type = self.schema()[self.parent_type].name();
            self.report(GraphqlError::non_null_violation(parent_type, self.field.name));
        }
        self.target.write(value);
    }

    /// Reports an error at the current path.
    pub(crate) fn report(&self, error: GraphqlError) {
        self.ctx
            .push_error(error.with_path(&self.path).with_locations(error_locations(self.field)));
    }

    /// Reports an error produced by a resolver, keeping its own path if it has one.
    pub(crate) fn report_field_error(&self, error: &FieldError) {
        let path: ErrorPath = match &error.path {
            Some(path) => path
                .iter()
                .map(|segment| match segment {
                    PathSegment::Field(name) => ErrorPathSegment::Field(name.as_str().into()),
                    PathSegment::Index(index) => ErrorPathSegment::Index(*index),
                })
                .collect(),
            None => (&self.path).into(),
        };
        self.ctx.push_error(
            GraphqlError::new(error.message.clone(), ErrorCode::FieldError)
                .with_path(path)
                .with_locations(error_locations(self.field))
                .with_extensions(error.extensions.iter().cloned()),
        );
    }

    /// The same value completed against the inner type of a non-null type, where null is an
    /// error.
    #[must_use]
    pub fn into_non_null(self) -> Self {
        assert!(
            self.ty.is_non_null(),
            "{} is not a non-null type",
            self.schema().type_display(self.ty)
        );
        CompletionContext {
            ty: self.ty.without_non_null(),
            is_nullable: false,
            ..self
        }
    }

    /// Completion of the element at `index` of the list being completed.
    pub(crate) fn list_element<'a>(
        &'a self,
        index: usize,
        element_type: Type,
        value: ResolvedValue,
        list: &'a ListAccumulator,
    ) -> CompletionContext<'a, 'op> {
        CompletionContext {
            ctx: self.ctx,
            parent_type: self.parent_type,
            field: self.field,
            value,
            ty: element_type,
            is_nullable: true,
            path: self.path.child(index),
            sources: self.sources.clone(),
            target: ResultTarget::ListElement { list, index },
        }
    }

    /// Integrates an empty object of type `object_id` and schedules the completion of each of
    /// its selected fields for the next stage.
    pub(crate) fn complete_object(mut self, object_id: DefinitionId) {
        let schema = self.schema();
        let fields = collect_fields(schema, self.ctx.operation, object_id, self.field.selection_sets());
        let object = Arc::new(ResponseObject::new(
            object_id,
            fields
                .iter()
                .map(|field| (field.response_key.clone(), slot_is_nullable(schema, object_id, field))),
        ));

        let source = self.take_value();
        let children = ObjectChildren {
            ctx: self.ctx,
            object_id,
            object: object.clone(),
            path: self.path.clone(),
            sources: self.sources.push(source),
            fields,
        };
        self.integrate(ResponseValue::Object(object));
        children.enqueue();
    }
}

struct ObjectChildren<'ctx, 'op> {
    ctx: ExecutionContext<'ctx, 'op>,
    object_id: DefinitionId,
    object: ResponseObjectRef,
    path: ResponsePath,
    sources: SourceStack,
    fields: Vec<CollectedField<'op>>,
}

impl ObjectChildren<'_, '_> {
    fn enqueue(self) {
        for (slot, field) in self.fields.into_iter().enumerate() {
            self.ctx.scheduler.enqueue(FieldTask {
                parent_type: self.object_id,
                path: self.path.child(field.response_key.clone()),
                sources: self.sources.clone(),
                object: self.object.clone(),
                slot,
                field,
            });
        }
    }
}
