use crossbeam_queue::SegQueue;
use operation::CollectedField;
use schema::DefinitionId;
use value::SourceStack;

use crate::{ResponseObjectRef, ResponsePath};

/// Resolution and completion of one field of an object, executed in the next stage.
#[derive(Debug)]
pub struct FieldTask<'op> {
    pub parent_type: DefinitionId,
    pub field: CollectedField<'op>,
    pub path: ResponsePath,
    /// Ends with the object the field belongs to.
    pub sources: SourceStack,
    pub object: ResponseObjectRef,
    pub slot: usize,
}

pub trait TaskScheduler<'op> {
    /// Must not block, the task is executed in a later stage.
    fn enqueue(&self, task: FieldTask<'op>);
}

/// Tasks of the next stage.
#[derive(Debug, Default)]
pub struct StageQueue<'op>(SegQueue<FieldTask<'op>>);

impl<'op> StageQueue<'op> {
    pub fn drain(&self) -> Vec<FieldTask<'op>> {
        let mut tasks = Vec::with_capacity(self.0.len());
        while let Some(task) = self.0.pop() {
            tasks.push(task);
        }
        tasks
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'op> TaskScheduler<'op> for StageQueue<'op> {
    fn enqueue(&self, task: FieldTask<'op>) {
        tracing::trace!(path = %task.path, "enqueued field");
        self.0.push(task);
    }
}
