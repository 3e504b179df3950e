//! Document read-side models.

pub mod model;

pub use model::{DocumentContext, STATUS_IN_CLARIFICATION};
