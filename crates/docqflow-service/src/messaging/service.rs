//! Message send/list operations and notification fan-out.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use docqflow_core::error::{AppError, ErrorKind};
use docqflow_core::result::AppResult;
use docqflow_entity::document::{DocumentContext, STATUS_IN_CLARIFICATION};
use docqflow_entity::message::{Message, MessageChannel};
use docqflow_entity::user::Role;
use docqflow_database::repositories::directory::DirectoryRepository;
use docqflow_database::repositories::message::MessageRepository;
use docqflow_database::repositories::notification::NotificationRepository;
use docqflow_database::repositories::participant::ParticipantRepository;

use crate::context::RequestContext;

use super::matrix;

/// Maximum characters of the message body echoed into a notification.
const PREVIEW_MAX_CHARS: usize = 80;

/// Routes document-bound messages between roles.
#[derive(Debug, Clone)]
pub struct MessagingService {
    /// Pool for transaction orchestration.
    pool: PgPool,
    /// Message repository.
    messages: Arc<MessageRepository>,
    /// Participant repository.
    participants: Arc<ParticipantRepository>,
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
    /// Document ownership directory.
    directory: Arc<DirectoryRepository>,
}

impl MessagingService {
    /// Creates a new messaging service.
    pub fn new(
        pool: PgPool,
        messages: Arc<MessageRepository>,
        participants: Arc<ParticipantRepository>,
        notifications: Arc<NotificationRepository>,
        directory: Arc<DirectoryRepository>,
    ) -> Self {
        Self {
            pool,
            messages,
            participants,
            notifications,
            directory,
        }
    }

    /// Send a message about a document.
    ///
    /// Validations run before any write: non-empty body, permitted role
    /// pair, document access. The message insert, participant rows, the
    /// notification fan-out, and the clarification status flip commit as
    /// one transaction; if any piece fails, nothing is visible.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        channel: MessageChannel,
        recipient_role: Role,
        body: &str,
    ) -> AppResult<Message> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Message body must not be empty"));
        }

        matrix::check(channel, ctx.role, recipient_role)?;

        let doc = self.require_document(document_id).await?;
        if !doc.grants_access(ctx.user_id, ctx.role) {
            return Err(AppError::forbidden("No access to this document"));
        }

        let recipients = doc.resolve(recipient_role);
        if recipients.is_empty() {
            return Err(AppError::validation(format!(
                "No user holds the '{recipient_role}' role on this document"
            )));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // The status flip applies only to the thread-opening clarification,
        // so the emptiness check must precede the insert.
        let opens_clarification = channel == MessageChannel::Clarification
            && ctx.role == Role::Accountant
            && self
                .messages
                .count_in_channel_tx(&mut tx, document_id, channel)
                .await?
                == 0;

        let message = self
            .messages
            .create_tx(
                &mut tx,
                document_id,
                channel,
                ctx.user_id,
                ctx.role,
                recipient_role,
                body,
            )
            .await?;

        let title = notification_title(channel, &doc.document_name);
        let preview = preview(body);
        for user_id in &recipients {
            self.participants
                .ensure_tx(&mut tx, document_id, *user_id, recipient_role)
                .await?;
            self.notifications
                .create_tx(&mut tx, *user_id, &title, &preview, Some(document_id))
                .await?;
        }

        if opens_clarification {
            self.directory
                .set_document_status_tx(&mut tx, document_id, STATUS_IN_CLARIFICATION)
                .await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit send", e)
        })?;

        info!(
            message_id = %message.id,
            document_id = %document_id,
            channel = %channel,
            sender_role = %ctx.role,
            recipient_role = %recipient_role,
            recipients = recipients.len(),
            "Message sent"
        );

        Ok(message)
    }

    /// List a document's messages for the viewer, marking the ones
    /// addressed to the viewer's role as read.
    ///
    /// Accountants see the full thread; clients and firms only see
    /// messages where their role is sender or recipient.
    pub async fn list_messages(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        channel: Option<MessageChannel>,
    ) -> AppResult<Vec<Message>> {
        self.require_read_access(ctx, document_id).await?;

        self.messages
            .mark_read_for_viewer(document_id, channel, ctx.role, ctx.user_id, Utc::now())
            .await?;

        let viewer_filter = if ctx.role.sees_full_thread() {
            None
        } else {
            Some(ctx.role)
        };
        self.messages
            .find_thread(document_id, channel, viewer_filter)
            .await
    }

    /// Count unread messages addressed to the viewer's role, without the
    /// read-marking side effect.
    pub async fn unread_count(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<i64> {
        self.require_read_access(ctx, document_id).await?;
        self.messages
            .count_unread(document_id, ctx.role, ctx.user_id)
            .await
    }

    /// Re-point the thread of a replaced document to its successor.
    ///
    /// Messages and participants move as one transaction; the old
    /// document keeps nothing. Invoked by the document-replacement flow,
    /// not by an HTTP caller.
    pub async fn reassign_document(
        &self,
        old_document_id: Uuid,
        new_document_id: Uuid,
    ) -> AppResult<u64> {
        self.require_document(new_document_id).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let moved = self
            .messages
            .reassign_document_tx(&mut tx, old_document_id, new_document_id)
            .await?;
        self.participants
            .reassign_document_tx(&mut tx, old_document_id, new_document_id)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reassignment", e)
        })?;

        info!(
            old_document_id = %old_document_id,
            new_document_id = %new_document_id,
            moved,
            "Thread reassigned to replacement document"
        );

        Ok(moved)
    }

    async fn require_document(&self, document_id: Uuid) -> AppResult<DocumentContext> {
        self.directory
            .document_context(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Read access: the ownership graph, or a participant row left behind
    /// by earlier fan-out (covers e.g. a since-reassigned accountant).
    async fn require_read_access(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<()> {
        let doc = self.require_document(document_id).await?;
        if doc.grants_access(ctx.user_id, ctx.role)
            || self.participants.exists(document_id, ctx.user_id).await?
        {
            Ok(())
        } else {
            Err(AppError::forbidden("No access to this document"))
        }
    }
}

fn notification_title(channel: MessageChannel, document_name: &str) -> String {
    match channel {
        MessageChannel::Chat => format!("New message on '{document_name}'"),
        MessageChannel::Clarification => format!("Clarification on '{document_name}'"),
    }
}

/// Truncate a message body for the notification preview.
fn preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_MAX_CHARS {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{truncated}...")
    }
}
