//! Application builder — wires repositories, services, and the router
//! into a running server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use docqflow_auth::JwtDecoder;
use docqflow_core::config::AppConfig;
use docqflow_core::error::AppError;
use docqflow_database::repositories::directory::DirectoryRepository;
use docqflow_database::repositories::message::MessageRepository;
use docqflow_database::repositories::notification::NotificationRepository;
use docqflow_database::repositories::participant::ParticipantRepository;
use docqflow_database::repositories::reminder::ReminderRepository;
use docqflow_service::messaging::MessagingService;
use docqflow_service::notification::NotificationService;
use docqflow_service::reminder::ReminderService;
use docqflow_worker::scheduler::SweepScheduler;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Wires repositories and services into the shared application state.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let messages = Arc::new(MessageRepository::new(db_pool.clone()));
    let participants = Arc::new(ParticipantRepository::new(db_pool.clone()));
    let reminders = Arc::new(ReminderRepository::new(db_pool.clone()));
    let notifications = Arc::new(NotificationRepository::new(db_pool.clone()));
    let directory = Arc::new(DirectoryRepository::new(db_pool.clone()));

    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let messaging_service = Arc::new(MessagingService::new(
        db_pool.clone(),
        Arc::clone(&messages),
        Arc::clone(&participants),
        Arc::clone(&notifications),
        Arc::clone(&directory),
    ));
    let reminder_service = Arc::new(ReminderService::new(
        db_pool.clone(),
        Arc::clone(&reminders),
        Arc::clone(&notifications),
        Arc::clone(&directory),
    ));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notifications)));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        messaging_service,
        reminder_service,
        notification_service,
    }
}

/// Runs the DocqFlow server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting DocqFlow server...");

    let state = build_state(config, db_pool);
    let config = Arc::clone(&state.config);

    // ── Shutdown channel & sweep trigger ─────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let sweeper_handle = if config.sweep.enabled {
        let mut sweeper = SweepScheduler::new(
            Arc::clone(&state.reminder_service),
            config.sweep.clone(),
        )
        .await?;
        sweeper.register().await?;
        sweeper.start().await?;

        Some(tokio::spawn(async move {
            let _ = shutdown_rx.changed().await;
            if let Err(e) = sweeper.shutdown().await {
                tracing::warn!("Failed to shut down sweep scheduler: {}", e);
            }
        }))
    } else {
        tracing::info!("In-process sweep trigger disabled");
        None
    };

    // ── Build and start HTTP server ──────────────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DocqFlow server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(handle) = sweeper_handle {
        let _ = handle.await;
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
