//! Participant repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_entity::message::Participant;
use docqflow_entity::user::Role;

/// Repository for the (document, user, role) participant cache.
#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    /// Create a new participant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure a participant row exists, inside the caller's transaction.
    ///
    /// Idempotent per (document, user, role).
    pub async fn ensure_tx(
        &self,
        conn: &mut PgConnection,
        document_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO message_participants (document_id, user_id, role) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (document_id, user_id, role) DO NOTHING",
        )
        .bind(document_id)
        .bind(user_id)
        .bind(role)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to ensure participant", e))?;
        Ok(())
    }

    /// List participants of a document.
    pub async fn find_by_document(&self, document_id: Uuid) -> AppResult<Vec<Participant>> {
        sqlx::query_as::<_, Participant>(
            "SELECT * FROM message_participants WHERE document_id = $1 ORDER BY created_at ASC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list participants", e))
    }

    /// Whether a user participates in a document's thread under any role.
    pub async fn exists(&self, document_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM message_participants WHERE document_id = $1 AND user_id = $2",
        )
        .bind(document_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check participant", e))?;
        Ok(count > 0)
    }

    /// Re-point participants from a replaced document to its successor.
    ///
    /// Rows that would collide with an existing (document, user, role)
    /// tuple on the new document are dropped instead.
    pub async fn reassign_document_tx(
        &self,
        conn: &mut PgConnection,
        old_document_id: Uuid,
        new_document_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "WITH moved AS (\
                 INSERT INTO message_participants (document_id, user_id, role, created_at) \
                 SELECT $2, user_id, role, created_at \
                 FROM message_participants WHERE document_id = $1 \
                 ON CONFLICT (document_id, user_id, role) DO NOTHING \
                 RETURNING 1\
             ) \
             DELETE FROM message_participants WHERE document_id = $1",
        )
        .bind(old_document_id)
        .bind(new_document_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reassign participants", e)
        })?;
        Ok(result.rows_affected())
    }
}
