//! Participant role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three roles that exchange messages about a document.
///
/// Document access rules and the messaging permission matrices are keyed
/// on this closed enum; the wire format and database enum are both the
/// lowercase variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A client of an accounting firm; owns their own documents.
    Client,
    /// A firm owner; sees every client of the firm.
    Firm,
    /// An accountant assigned to specific clients; mediates between
    /// firm and client and therefore sees full message threads.
    Accountant,
}

impl Role {
    /// Whether this role sees document threads unfiltered.
    pub fn sees_full_thread(&self) -> bool {
        matches!(self, Self::Accountant)
    }

    /// Whether this role may manage reminders and scope a sweep.
    pub fn manages_reminders(&self) -> bool {
        matches!(self, Self::Firm | Self::Accountant)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Firm => "firm",
            Self::Accountant => "accountant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = docqflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "firm" => Ok(Self::Firm),
            "accountant" => Ok(Self::Accountant),
            _ => Err(docqflow_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: client, firm, accountant"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("ACCOUNTANT".parse::<Role>().unwrap(), Role::Accountant);
        assert!("super_admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_thread_visibility() {
        assert!(Role::Accountant.sees_full_thread());
        assert!(!Role::Client.sees_full_thread());
        assert!(!Role::Firm.sees_full_thread());
    }

    #[test]
    fn test_reminder_management() {
        assert!(Role::Firm.manages_reminders());
        assert!(Role::Accountant.manages_reminders());
        assert!(!Role::Client.manages_reminders());
    }
}
