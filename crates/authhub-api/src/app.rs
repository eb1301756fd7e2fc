//! Application builder, wires router + middleware + state into an Axum
//! app and runs the server.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use authhub_auth::{AuthService, SessionAuthority, TokenDecoder, TokenEncoder};
use authhub_core::config::AppConfig;
use authhub_core::error::AppError;
use authhub_core::traits::{Clock, Mailer, SystemClock};
use authhub_database::DatabasePool;
use authhub_database::repositories::{SessionRepository, UserRepository};
use authhub_entity::session::SessionStore;
use authhub_entity::user::CredentialStore;
use authhub_mail::{LogMailer, SmtpMailer};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the AuthHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let config = Arc::new(config);

    let users: Arc<dyn CredentialStore> = Arc::new(UserRepository::new(db.pool().clone()));
    let session_store: Arc<dyn SessionStore> = Arc::new(SessionRepository::new(db.pool().clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let sessions = Arc::new(SessionAuthority::new(
        TokenEncoder::new(&config.auth),
        TokenDecoder::new(&config.auth),
        session_store,
        clock.clone(),
    ));

    let mailer: Arc<dyn Mailer> = if config.mail.smtp_enabled() {
        info!(relay = %config.mail.smtp_host, "Using SMTP mail delivery");
        Arc::new(SmtpMailer::new(&config.mail)?)
    } else {
        info!("No SMTP relay configured, mail will be logged");
        Arc::new(LogMailer::new())
    };

    let auth = Arc::new(AuthService::new(
        users.clone(),
        sessions,
        mailer,
        clock,
        &config.auth,
        config.mail.clone(),
    ));

    let state = AppState::new(config.clone(), auth, users);
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "AuthHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    info!("AuthHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
