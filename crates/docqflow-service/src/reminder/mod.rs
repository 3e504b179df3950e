//! Reminder scheduler: creation, recurrence chaining, and the sweep.

pub mod service;

pub use service::{CreateReminder, ReminderService};
