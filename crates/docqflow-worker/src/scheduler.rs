//! Cron scheduler firing the periodic reminder sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use docqflow_core::config::sweep::SweepConfig;
use docqflow_core::error::AppError;
use docqflow_service::reminder::ReminderService;

/// Cron-based trigger for the unscoped reminder sweep.
pub struct SweepScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Reminder service invoked on each tick
    reminders: Arc<ReminderService>,
    /// Sweep configuration
    config: SweepConfig,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler")
            .field("cron", &self.config.cron)
            .finish()
    }
}

impl SweepScheduler {
    /// Create a new sweep scheduler
    pub async fn new(
        reminders: Arc<ReminderService>,
        config: SweepConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            reminders,
            config,
        })
    }

    /// Register the sweep task
    pub async fn register(&self) -> Result<(), AppError> {
        let reminders = Arc::clone(&self.reminders);
        let job = CronJob::new_async(self.config.cron.as_str(), move |_uuid, _lock| {
            let reminders = Arc::clone(&reminders);
            Box::pin(async move {
                match reminders.sweep(None).await {
                    Ok(0) => tracing::trace!("Sweep tick: nothing due"),
                    Ok(processed) => tracing::info!(processed, "Sweep tick delivered reminders"),
                    Err(e) => tracing::error!("Sweep tick failed: {}", e),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create sweep schedule: {}", e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add sweep schedule: {}", e)))?;

        tracing::info!("Registered: reminder_sweep ({})", self.config.cron);
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Sweep scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Sweep scheduler shut down");
        Ok(())
    }
}
