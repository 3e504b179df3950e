//! Reminder entities and recurrence math.

pub mod model;
pub mod recurrence;

pub use model::{RecipientKind, Reminder, ReminderStatus, SendOption};
pub use recurrence::{Recurrence, next_occurrence};
