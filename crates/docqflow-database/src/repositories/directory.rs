//! Read-only directory over the external user/firm/client/document graph.
//!
//! The messaging and reminder layers never mutate this graph; the one
//! exception is the documented clarification status flip on `documents`,
//! which runs inside the caller's send transaction.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_entity::document::DocumentContext;

/// Resolves documents to their ownership context.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the ownership context for a document.
    ///
    /// Returns `None` when the document does not exist.
    pub async fn document_context(
        &self,
        document_id: Uuid,
    ) -> AppResult<Option<DocumentContext>> {
        sqlx::query_as::<_, DocumentContext>(
            "SELECT d.id AS document_id, d.name AS document_name, d.status, \
                    d.client_id, c.firm_id, c.user_id AS client_user_id, \
                    f.owner_user_id AS firm_owner_user_id, c.accountant_user_id \
             FROM documents d \
             JOIN clients c ON c.id = d.client_id \
             JOIN firms f ON f.id = c.firm_id \
             WHERE d.id = $1",
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load document context", e)
        })
    }

    /// Check that a user exists.
    pub async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up user", e))?;
        Ok(count > 0)
    }

    /// Check that a firm exists.
    pub async fn firm_exists(&self, firm_id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM firms WHERE id = $1")
            .bind(firm_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up firm", e))?;
        Ok(count > 0)
    }

    /// Flip a document's status inside the caller's transaction.
    pub async fn set_document_status_tx(
        &self,
        conn: &mut PgConnection,
        document_id: Uuid,
        status: &str,
    ) -> AppResult<()> {
        sqlx::query("UPDATE documents SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(document_id)
            .bind(status)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update document status", e)
            })?;
        Ok(())
    }
}
