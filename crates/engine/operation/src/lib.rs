mod collect;
mod model;

pub use collect::*;
pub use model::*;
