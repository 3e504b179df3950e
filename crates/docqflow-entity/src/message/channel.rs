//! Message channel enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which conversation a message belongs to.
///
/// Each channel carries its own sender/recipient permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "message_channel", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    /// General chat about the document.
    Chat,
    /// A clarification thread mediated by the accountant.
    Clarification,
}

impl Default for MessageChannel {
    fn default() -> Self {
        Self::Chat
    }
}

impl fmt::Display for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::Clarification => write!(f, "clarification"),
        }
    }
}
