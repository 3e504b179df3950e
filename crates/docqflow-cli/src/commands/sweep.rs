//! One-shot reminder sweep — the unattended local-process invoker.

use std::sync::Arc;

use clap::Args;
use uuid::Uuid;

use docqflow_core::error::AppError;
use docqflow_database::repositories::directory::DirectoryRepository;
use docqflow_database::repositories::notification::NotificationRepository;
use docqflow_database::repositories::reminder::ReminderRepository;
use docqflow_service::reminder::ReminderService;

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Restrict the sweep to one firm
    #[arg(long)]
    pub firm: Option<Uuid>,
}

/// Execute the sweep command
pub async fn execute(args: &SweepArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    let service = ReminderService::new(
        pool.clone(),
        Arc::new(ReminderRepository::new(pool.clone())),
        Arc::new(NotificationRepository::new(pool.clone())),
        Arc::new(DirectoryRepository::new(pool.clone())),
    );

    let processed = service.sweep(args.firm).await?;
    println!("Processed {} reminder(s).", processed);

    Ok(())
}
