//! Repository implementations, one per table plus the read-only
//! directory view over the external user/firm/client/document graph.

pub mod directory;
pub mod message;
pub mod notification;
pub mod participant;
pub mod reminder;
