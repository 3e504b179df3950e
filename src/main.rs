//! DocqFlow Server — document messaging and reminders for accounting firms
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use docqflow_core::config::AppConfig;
use docqflow_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("DOCQFLOW_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocqFlow v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = docqflow_database::connection::create_pool(&config.database).await?;

    docqflow_database::migration::run_migrations(&db_pool).await?;

    docqflow_api::app::run_server(config, db_pool).await
}
