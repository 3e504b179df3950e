//! Notification repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_core::types::pagination::{PageRequest, PageResponse};
use docqflow_entity::notification::Notification;

/// Repository for notification rows.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification inside the caller's transaction.
    ///
    /// Message fan-out and reminder delivery both require the notification
    /// to commit together with the row that caused it.
    pub async fn create_tx(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        title: &str,
        body: &str,
        document_id: Option<Uuid>,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, title, body, document_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(body)
        .bind(document_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    /// List notifications for a user, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let notifs = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark a notification as read. Returns false when no row matched.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $3 \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all notifications as read for a user.
    pub async fn mark_all_read(&self, user_id: Uuid, read_at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 \
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    /// Delete a notification. Returns false when no row matched.
    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
