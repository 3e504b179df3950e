//! Notification listing and read-state management.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use docqflow_core::error::AppError;
use docqflow_core::result::AppResult;
use docqflow_core::types::pagination::{PageRequest, PageResponse};
use docqflow_entity::notification::Notification;
use docqflow_database::repositories::notification::NotificationRepository;

use crate::context::RequestContext;

/// Manages the current user's notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Lists notifications for the current user.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.notifications.find_by_user(ctx.user_id, &page).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notifications.count_unread(ctx.user_id).await
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        let marked = self
            .notifications
            .mark_read(notification_id, ctx.user_id, Utc::now())
            .await?;
        if marked {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notifications.mark_all_read(ctx.user_id, Utc::now()).await
    }

    /// Deletes a notification (the explicit user action).
    pub async fn delete(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        let deleted = self.notifications.delete(notification_id, ctx.user_id).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }
}
