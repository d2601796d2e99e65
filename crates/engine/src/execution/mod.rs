mod cancellation;
mod context;
pub(crate) mod executor;
mod resolver;
mod scheduler;

#[cfg(test)]
mod tests;

pub use cancellation::*;
pub use context::*;
pub use executor::*;
pub use resolver::*;
pub use scheduler::*;
