//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod sweep;

use clap::{Parser, Subcommand};

use docqflow_core::error::AppError;

/// DocqFlow — document messaging and reminders for accounting firms
#[derive(Debug, Parser)]
#[command(name = "docqflow", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the DocqFlow server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Deliver all due pending reminders once
    Sweep(sweep::SweepArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Sweep(args) => sweep::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<docqflow_core::config::AppConfig, AppError> {
    docqflow_core::config::AppConfig::load(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &docqflow_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    docqflow_database::connection::create_pool(&config.database).await
}
