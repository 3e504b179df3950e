//! Reminder repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_core::types::pagination::{PageRequest, PageResponse};
use docqflow_entity::reminder::{RecipientKind, Recurrence, Reminder, ReminderStatus};

/// Column values for a reminder insert.
#[derive(Debug, Clone)]
pub struct NewReminder {
    /// Firm scope.
    pub firm_id: Uuid,
    /// Creating user.
    pub created_by: Uuid,
    /// Recipient entity kind.
    pub recipient_kind: RecipientKind,
    /// Recipient entity id.
    pub recipient_id: Uuid,
    /// Recipient user, denormalized for delivery.
    pub recipient_user_id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Delivery time (equals `sent_at` for immediate delivery).
    pub scheduled_at: DateTime<Utc>,
    /// Initial status.
    pub status: ReminderStatus,
    /// Delivery timestamp, set for immediate delivery.
    pub sent_at: Option<DateTime<Utc>>,
    /// Recurrence rule.
    pub recurrence: Recurrence,
    /// Recurrence end boundary.
    pub recurrence_end_at: Option<DateTime<Utc>>,
}

/// Repository for reminder rows.
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    /// Create a new reminder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a reminder inside the caller's transaction.
    pub async fn create_tx(
        &self,
        conn: &mut PgConnection,
        new: &NewReminder,
    ) -> AppResult<Reminder> {
        sqlx::query_as::<_, Reminder>(
            "INSERT INTO reminders (firm_id, created_by, recipient_kind, recipient_id, \
                                    recipient_user_id, title, body, scheduled_at, status, \
                                    sent_at, recurrence, recurrence_end_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(new.firm_id)
        .bind(new.created_by)
        .bind(new.recipient_kind)
        .bind(new.recipient_id)
        .bind(new.recipient_user_id)
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.scheduled_at)
        .bind(new.status)
        .bind(new.sent_at)
        .bind(new.recurrence)
        .bind(new.recurrence_end_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create reminder", e))
    }

    /// Find a reminder by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reminder", e))
    }

    /// Ids of pending reminders due at `now`, oldest first, optionally
    /// scoped to one firm.
    pub async fn find_due(&self, scope: Option<Uuid>, now: DateTime<Utc>) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar(
            "SELECT id FROM reminders \
             WHERE status = 'pending' AND scheduled_at <= $1 \
               AND ($2::uuid IS NULL OR firm_id = $2) \
             ORDER BY scheduled_at ASC",
        )
        .bind(now)
        .bind(scope)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find due reminders", e))
    }

    /// Claim one due pending reminder inside the caller's transaction.
    ///
    /// The status predicate makes the claim conditional: a row already
    /// taken by a concurrent sweep yields `None` and must be skipped, so
    /// each reminder is delivered at most once.
    pub async fn claim_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET status = 'sent', sent_at = $2 \
             WHERE id = $1 AND status = 'pending' AND scheduled_at <= $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim reminder", e))
    }

    /// List a firm's reminders, newest first.
    pub async fn find_by_firm(
        &self,
        firm_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reminder>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reminders WHERE firm_id = $1")
            .bind(firm_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reminders", e)
            })?;

        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE firm_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(firm_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reminders", e))?;

        Ok(PageResponse::new(
            reminders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
