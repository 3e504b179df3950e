//! Message thread entities.

pub mod channel;
pub mod model;
pub mod participant;

pub use channel::MessageChannel;
pub use model::Message;
pub use participant::Participant;
