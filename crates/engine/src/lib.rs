//! Field value completion.
//!
//! A resolver produces a raw [`ResolvedValue`] for a field. Completion reduces it into the
//! response tree according to the field's declared type: it enforces nullability, serializes
//! leaves, reports errors and, for object values, writes an empty object and schedules one
//! task per selected sub-field for the next execution stage.

mod completion;
mod config;
mod convert;
mod execution;
mod response;

pub use completion::*;
pub use config::*;
pub use convert::*;
pub use execution::*;
pub use response::*;

pub use error::{ErrorCode, GraphqlError};
pub use value::{FieldError, JsonObject, ResolvedObject, ResolvedValue, SourceStack};
