//! # Café Stock Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ServerConfig::load() ──► Database::new() ──► AppState                 │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │  TcpListener (CAFE_BIND_ADDR:CAFE_HTTP_PORT) ──► axum::serve            │
//! │                                                  │                      │
//! │  Ctrl+C / SIGTERM ──► graceful shutdown ──► pool closed                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use cafe_db::Database;
use cafe_server::{build_router, AppState, ServerConfig, SessionStore};
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// How often expired sessions are swept from memory.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Café Stock server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.db_path.display(),
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(config.db_config()).await?;
    info!("Database connected and migrations applied");

    let addr = config.socket_addr();
    let state = AppState::new(db.clone(), config);

    tokio::spawn(purge_sessions(state.sessions.clone()));

    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening for HTTP requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Verbose output
/// - `RUST_LOG=info` - Normal output
/// - `RUST_LOG=cafe_db=trace` - Trace database layer only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cafe=debug,sqlx=warn,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Periodically drops idle sessions.
async fn purge_sessions(sessions: SessionStore) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        interval.tick().await;
        let removed = sessions.purge_expired().await;
        if removed > 0 {
            let remaining = sessions.len().await;
            debug!(removed, remaining, "Purged expired sessions");
        }
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
