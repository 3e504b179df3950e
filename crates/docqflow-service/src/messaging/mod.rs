//! Messaging router: permission matrices and the send/list operations.

pub mod matrix;
pub mod service;

pub use service::MessagingService;
