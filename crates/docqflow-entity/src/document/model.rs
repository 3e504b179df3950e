//! Document ownership context.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::Role;

/// Document status value set when an accountant opens a clarification
/// thread on a document that had none.
pub const STATUS_IN_CLARIFICATION: &str = "in_clarification";

/// The resolved ownership graph around one document.
///
/// One row per document, produced by a single join over
/// documents → clients → firms. This is the only view of the external
/// schema the messaging layer consults: role→user resolution and
/// document-access checks are both answered from it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentContext {
    /// The document.
    pub document_id: Uuid,
    /// Document display name.
    pub document_name: String,
    /// Current document status.
    pub status: String,
    /// The owning client record.
    pub client_id: Uuid,
    /// The firm the client belongs to.
    pub firm_id: Uuid,
    /// The client's own user.
    pub client_user_id: Uuid,
    /// The firm owner's user.
    pub firm_owner_user_id: Uuid,
    /// The accountant assigned to the client, if any.
    pub accountant_user_id: Option<Uuid>,
}

impl DocumentContext {
    /// Resolve a role to the concrete user(s) holding it on this document.
    ///
    /// Contract: `resolve(role)` returns every user id that should see
    /// messages addressed to `role`, in no particular order. An unassigned
    /// accountant resolves to an empty list.
    pub fn resolve(&self, role: Role) -> Vec<Uuid> {
        match role {
            Role::Client => vec![self.client_user_id],
            Role::Firm => vec![self.firm_owner_user_id],
            Role::Accountant => self.accountant_user_id.into_iter().collect(),
        }
    }

    /// Whether `user_id`, acting under `role`, may touch this document.
    ///
    /// Access means: the client owns the document's client record, the
    /// accountant is assigned to that client, or the firm owns the
    /// client's firm.
    pub fn grants_access(&self, user_id: Uuid, role: Role) -> bool {
        match role {
            Role::Client => self.client_user_id == user_id,
            Role::Firm => self.firm_owner_user_id == user_id,
            Role::Accountant => self.accountant_user_id == Some(user_id),
        }
    }
}
