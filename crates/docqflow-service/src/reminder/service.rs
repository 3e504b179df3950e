//! Reminder creation and sweep delivery.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_core::types::pagination::{PageRequest, PageResponse};
use docqflow_entity::reminder::{
    RecipientKind, Recurrence, Reminder, ReminderStatus, SendOption, next_occurrence,
};
use docqflow_database::repositories::directory::DirectoryRepository;
use docqflow_database::repositories::notification::NotificationRepository;
use docqflow_database::repositories::reminder::{NewReminder, ReminderRepository};

use crate::context::RequestContext;

/// Parameters for creating a reminder.
#[derive(Debug, Clone)]
pub struct CreateReminder {
    /// Recipient entity kind.
    pub recipient_kind: RecipientKind,
    /// Recipient entity id (client or accountant record).
    pub recipient_id: Uuid,
    /// Recipient user, denormalized for delivery.
    pub recipient_user_id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Immediate or scheduled delivery.
    pub send_option: SendOption,
    /// Delivery time; required when scheduling.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Recurrence rule.
    pub recurrence: Recurrence,
    /// Recurrence end boundary.
    pub recurrence_end_at: Option<DateTime<Utc>>,
}

/// Creates reminders and delivers the due ones.
#[derive(Debug, Clone)]
pub struct ReminderService {
    /// Pool for transaction orchestration.
    pool: PgPool,
    /// Reminder repository.
    reminders: Arc<ReminderRepository>,
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
    /// User/firm directory.
    directory: Arc<DirectoryRepository>,
}

impl ReminderService {
    /// Creates a new reminder service.
    pub fn new(
        pool: PgPool,
        reminders: Arc<ReminderRepository>,
        notifications: Arc<NotificationRepository>,
        directory: Arc<DirectoryRepository>,
    ) -> Self {
        Self {
            pool,
            reminders,
            notifications,
            directory,
        }
    }

    /// Create a reminder for a recipient of the caller's firm.
    ///
    /// `send_option = now` delivers synchronously: the reminder row (born
    /// `sent`), its notification, and the next recurring occurrence commit
    /// together. `send_option = schedule` requires a strictly-future
    /// `scheduled_at` and persists a pending row only.
    pub async fn create(&self, ctx: &RequestContext, req: CreateReminder) -> AppResult<Reminder> {
        if !ctx.role.manages_reminders() {
            return Err(AppError::forbidden(
                "Only firm and accountant callers may create reminders",
            ));
        }
        let firm_id = ctx.require_firm()?;

        let title = req.title.trim();
        let body = req.body.trim();
        if title.is_empty() || body.is_empty() {
            return Err(AppError::validation("Title and body must not be empty"));
        }
        if !self.directory.firm_exists(firm_id).await? {
            return Err(AppError::not_found("Firm not found"));
        }
        if !self.directory.user_exists(req.recipient_user_id).await? {
            return Err(AppError::not_found("Recipient user not found"));
        }

        match req.send_option {
            SendOption::Now => self.create_and_deliver(ctx, firm_id, &req, title, body).await,
            SendOption::Schedule => {
                let scheduled_at = req.scheduled_at.ok_or_else(|| {
                    AppError::validation("scheduled_at is required when scheduling")
                })?;
                if scheduled_at <= Utc::now() {
                    return Err(AppError::validation("scheduled_at must be in the future"));
                }

                let mut conn = self.pool.acquire().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
                })?;
                let reminder = self
                    .reminders
                    .create_tx(
                        &mut conn,
                        &NewReminder {
                            firm_id,
                            created_by: ctx.user_id,
                            recipient_kind: req.recipient_kind,
                            recipient_id: req.recipient_id,
                            recipient_user_id: req.recipient_user_id,
                            title: title.to_string(),
                            body: body.to_string(),
                            scheduled_at,
                            status: ReminderStatus::Pending,
                            sent_at: None,
                            recurrence: req.recurrence,
                            recurrence_end_at: req.recurrence_end_at,
                        },
                    )
                    .await?;

                info!(reminder_id = %reminder.id, %scheduled_at, "Reminder scheduled");
                Ok(reminder)
            }
        }
    }

    /// Immediate delivery: reminder, notification, and recurrence chain in
    /// one transaction.
    async fn create_and_deliver(
        &self,
        ctx: &RequestContext,
        firm_id: Uuid,
        req: &CreateReminder,
        title: &str,
        body: &str,
    ) -> AppResult<Reminder> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let reminder = self
            .reminders
            .create_tx(
                &mut tx,
                &NewReminder {
                    firm_id,
                    created_by: ctx.user_id,
                    recipient_kind: req.recipient_kind,
                    recipient_id: req.recipient_id,
                    recipient_user_id: req.recipient_user_id,
                    title: title.to_string(),
                    body: body.to_string(),
                    scheduled_at: now,
                    status: ReminderStatus::Sent,
                    sent_at: Some(now),
                    recurrence: req.recurrence,
                    recurrence_end_at: req.recurrence_end_at,
                },
            )
            .await?;

        self.notifications
            .create_tx(&mut tx, reminder.recipient_user_id, title, body, None)
            .await?;

        if let Some(next) = next_occurrence(now, req.recurrence, req.recurrence_end_at) {
            self.chain_next(&mut tx, &reminder, next).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reminder delivery", e)
        })?;

        info!(reminder_id = %reminder.id, "Reminder delivered immediately");
        Ok(reminder)
    }

    /// Deliver all due pending reminders, optionally scoped to one firm.
    ///
    /// Each reminder is claimed, delivered, and chained in its own
    /// transaction; one failure does not abort the rest of the batch, and
    /// nothing already delivered is ever rolled back. Returns the number
    /// of reminders processed by this invocation.
    pub async fn sweep(&self, scope: Option<Uuid>) -> AppResult<u64> {
        let now = Utc::now();
        let due = self.reminders.find_due(scope, now).await?;

        let mut processed = 0u64;
        for id in due {
            match self.deliver_due(id, now).await {
                Ok(true) => processed += 1,
                // Claimed by a concurrent sweep; not ours to count.
                Ok(false) => {}
                Err(e) => {
                    warn!(reminder_id = %id, error = %e, "Failed to deliver reminder, continuing");
                }
            }
        }

        if processed > 0 {
            info!(processed, scoped = scope.is_some(), "Reminder sweep complete");
        }
        Ok(processed)
    }

    /// Claim, deliver, and chain one due reminder as a single transaction.
    async fn deliver_due(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let Some(reminder) = self.reminders.claim_tx(&mut tx, id, now).await? else {
            return Ok(false);
        };

        self.notifications
            .create_tx(
                &mut tx,
                reminder.recipient_user_id,
                &reminder.title,
                &reminder.body,
                None,
            )
            .await?;

        // Chain from the actual delivery time, not the original schedule.
        if let Some(next) = next_occurrence(now, reminder.recurrence, reminder.recurrence_end_at) {
            self.chain_next(&mut tx, &reminder, next).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reminder delivery", e)
        })?;
        Ok(true)
    }

    /// Insert the next pending occurrence of a recurring reminder.
    async fn chain_next(
        &self,
        tx: &mut sqlx::PgConnection,
        delivered: &Reminder,
        next: DateTime<Utc>,
    ) -> AppResult<()> {
        let sibling = self
            .reminders
            .create_tx(
                tx,
                &NewReminder {
                    firm_id: delivered.firm_id,
                    created_by: delivered.created_by,
                    recipient_kind: delivered.recipient_kind,
                    recipient_id: delivered.recipient_id,
                    recipient_user_id: delivered.recipient_user_id,
                    title: delivered.title.clone(),
                    body: delivered.body.clone(),
                    scheduled_at: next,
                    status: ReminderStatus::Pending,
                    sent_at: None,
                    recurrence: delivered.recurrence,
                    recurrence_end_at: delivered.recurrence_end_at,
                },
            )
            .await?;
        info!(
            reminder_id = %delivered.id,
            next_id = %sibling.id,
            scheduled_at = %next,
            "Recurring reminder chained"
        );
        Ok(())
    }

    /// List the caller's firm reminders, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Reminder>> {
        if !ctx.role.manages_reminders() {
            return Err(AppError::forbidden(
                "Only firm and accountant callers may list reminders",
            ));
        }
        let firm_id = ctx.require_firm()?;
        self.reminders.find_by_firm(firm_id, &page).await
    }
}
