//! Sender/recipient permission matrices.
//!
//! Two independent matrices exist, one per channel. Both are total over
//! the role enum: every (channel, sender) pair has an explicit recipient
//! list, and anything outside it is rejected.

use docqflow_core::error::AppError;
use docqflow_core::result::AppResult;
use docqflow_entity::message::MessageChannel;
use docqflow_entity::user::Role;

/// The recipient roles a sender may address on a channel.
pub fn allowed_recipients(channel: MessageChannel, sender: Role) -> &'static [Role] {
    match (channel, sender) {
        // Direct chat: clients and accountants talk to the firm; the firm
        // talks to either side.
        (MessageChannel::Chat, Role::Client) => &[Role::Firm],
        (MessageChannel::Chat, Role::Accountant) => &[Role::Firm],
        (MessageChannel::Chat, Role::Firm) => &[Role::Client, Role::Accountant],
        // Clarification threads: the accountant mediates, so every pair
        // involves one.
        (MessageChannel::Clarification, Role::Client) => &[Role::Accountant],
        (MessageChannel::Clarification, Role::Accountant) => &[Role::Client, Role::Firm],
        (MessageChannel::Clarification, Role::Firm) => &[Role::Accountant],
    }
}

/// Whether the sender may address the recipient role on the channel.
pub fn is_allowed(channel: MessageChannel, sender: Role, recipient: Role) -> bool {
    allowed_recipients(channel, sender).contains(&recipient)
}

/// Reject pairs outside the matrix with a `Forbidden` error.
pub fn check(channel: MessageChannel, sender: Role, recipient: Role) -> AppResult<()> {
    if is_allowed(channel, sender, recipient) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Sending from '{sender}' to '{recipient}' is not permitted on the {channel} channel"
        )))
    }
}
