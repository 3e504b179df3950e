//! Notification read surface.

pub mod service;

pub use service::NotificationService;
