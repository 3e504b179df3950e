//! Message repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_entity::message::{Message, MessageChannel};
use docqflow_entity::user::Role;

/// Repository for message rows.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a message inside the caller's transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_tx(
        &self,
        conn: &mut PgConnection,
        document_id: Uuid,
        channel: MessageChannel,
        sender_id: Uuid,
        sender_role: Role,
        recipient_role: Role,
        body: &str,
    ) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (document_id, channel, sender_id, sender_role, recipient_role, body) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(document_id)
        .bind(channel)
        .bind(sender_id)
        .bind(sender_role)
        .bind(recipient_role)
        .bind(body)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))
    }

    /// List a document's messages in arrival order.
    ///
    /// `viewer_role = None` returns the full thread; otherwise only rows
    /// where the role is sender or recipient are returned.
    pub async fn find_thread(
        &self,
        document_id: Uuid,
        channel: Option<MessageChannel>,
        viewer_role: Option<Role>,
    ) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages \
             WHERE document_id = $1 \
               AND ($2::message_channel IS NULL OR channel = $2) \
               AND ($3::user_role IS NULL OR sender_role = $3 OR recipient_role = $3) \
             ORDER BY created_at ASC",
        )
        .bind(document_id)
        .bind(channel)
        .bind(viewer_role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    /// Mark unread messages addressed to the viewer's role as read.
    ///
    /// Skips messages the viewer authored. Returns the number of rows
    /// stamped.
    pub async fn mark_read_for_viewer(
        &self,
        document_id: Uuid,
        channel: Option<MessageChannel>,
        viewer_role: Role,
        viewer_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE, read_at = $5 \
             WHERE document_id = $1 \
               AND ($2::message_channel IS NULL OR channel = $2) \
               AND recipient_role = $3 \
               AND sender_id <> $4 \
               AND is_read = FALSE",
        )
        .bind(document_id)
        .bind(channel)
        .bind(viewer_role)
        .bind(viewer_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark messages read", e))?;
        Ok(result.rows_affected())
    }

    /// Count unread messages addressed to the viewer's role.
    pub async fn count_unread(
        &self,
        document_id: Uuid,
        viewer_role: Role,
        viewer_id: Uuid,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages \
             WHERE document_id = $1 AND recipient_role = $2 \
               AND sender_id <> $3 AND is_read = FALSE",
        )
        .bind(document_id)
        .bind(viewer_role)
        .bind(viewer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Count messages on a channel inside the caller's transaction.
    ///
    /// Used to detect the initial clarification on a document.
    pub async fn count_in_channel_tx(
        &self,
        conn: &mut PgConnection,
        document_id: Uuid,
        channel: MessageChannel,
    ) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE document_id = $1 AND channel = $2")
            .bind(document_id)
            .bind(channel)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count messages", e))
    }

    /// Re-point all messages from a replaced document to its successor.
    pub async fn reassign_document_tx(
        &self,
        conn: &mut PgConnection,
        old_document_id: Uuid,
        new_document_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE messages SET document_id = $2 WHERE document_id = $1")
            .bind(old_document_id)
            .bind(new_document_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reassign messages", e)
            })?;
        Ok(result.rows_affected())
    }
}
