//! # Haven Booking API
//!
//! Bootstrap binary for the booking backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking API Process                              │
//! │                                                                         │
//! │  Consumer ───► HTTP transport ───► Services ───► SQLite                │
//! │                (external)             │                                 │
//! │                                       ├──► Payment processor (HTTPS)   │
//! │                                       └──► SMTP relay (async dispatch) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport is an external collaborator that mounts on the library's
//! service layer. This binary owns the process lifecycle: configuration,
//! database + migrations, notifier verification, graceful shutdown.

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use haven_booking_api::config::AppConfig;
use haven_booking_api::notify::{Notifier, SmtpNotifier};
use haven_booking_api::AppState;
use haven_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .pretty()
        .init();

    info!("Starting Haven booking API...");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        database_path = %config.database_path,
        smtp_host = %config.smtp_host,
        "Configuration loaded"
    );

    // Connect to database (runs embedded migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite, migrations complete");

    // Verify the notification transport; delivery is fire-and-forget, so a
    // failed verification is a warning, not a fatal error
    match SmtpNotifier::new(&config) {
        Ok(notifier) => match notifier.verify().await {
            Ok(()) => info!("SMTP transport verified"),
            Err(e) => warn!(error = %e, "SMTP transport unverified, continuing"),
        },
        Err(e) => warn!(error = %e, "SMTP notifier misconfigured, continuing"),
    }

    let state = AppState { db, config };

    info!("Booking API ready");

    shutdown_signal().await;

    state.db.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
