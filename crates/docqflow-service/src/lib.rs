//! # docqflow-service
//!
//! Business logic for DocqFlow: the messaging router, the reminder
//! scheduler, and the notification read surface. Services orchestrate
//! repositories and own the transaction boundaries; identity is threaded
//! in explicitly via [`context::RequestContext`], never read from ambient
//! state.

pub mod context;
pub mod messaging;
pub mod notification;
pub mod reminder;
