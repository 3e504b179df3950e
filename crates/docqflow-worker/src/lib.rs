//! # docqflow-worker
//!
//! The in-process cron trigger for the reminder sweep. The sweep itself
//! is idempotent and externally triggerable (HTTP endpoint, CLI); this
//! crate only fires it on a schedule so due reminders are delivered
//! without an external cron.

pub mod scheduler;

pub use scheduler::SweepScheduler;
