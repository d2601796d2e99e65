use crossbeam_queue::SegQueue;
use error::GraphqlError;

/// Errors reported during execution, in reporting order.
#[derive(Debug, Default)]
pub struct ResponseErrors(SegQueue<GraphqlError>);

impl ResponseErrors {
    pub fn push(&self, error: GraphqlError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<GraphqlError> {
        let mut errors = Vec::with_capacity(self.0.len());
        while let Some(error) = self.0.pop() {
            errors.push(error);
        }
        errors
    }
}
