//! Graceful shutdown and signal handling.
//!
//! SIGTERM/SIGINT stop accepting new connections and give in-flight ones
//! `GRACEFUL_SHUTDOWN_TIMEOUT_SECS` to finish.

use std::time::Duration;

use axum_server::Handle;

use crate::config::GRACEFUL_SHUTDOWN_TIMEOUT_SECS;

#[cfg(unix)]
type Terminate = Option<tokio::signal::unix::Signal>;
#[cfg(not(unix))]
type Terminate = ();

/// Register for SIGTERM now so a signal sent right after startup is not lost.
#[cfg(unix)]
fn install_terminate() -> Terminate {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(sigterm) => Some(sigterm),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            None
        }
    }
}

#[cfg(not(unix))]
fn install_terminate() -> Terminate {}

/// Resolve when SIGINT or SIGTERM arrives.
async fn wait_for_signal(terminate: Terminate) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async move {
        match terminate {
            Some(mut sigterm) => {
                sigterm.recv().await;
            }
            None => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = {
        let () = terminate;
        std::future::pending::<()>()
    };

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// Must be called from within the tokio runtime.
pub fn setup_shutdown_handler(handle: Handle) {
    let terminate = install_terminate();

    tokio::spawn(async move {
        wait_for_signal(terminate).await;

        handle.graceful_shutdown(Some(Duration::from_secs(GRACEFUL_SHUTDOWN_TIMEOUT_SECS)));
        tracing::info!(
            timeout_secs = GRACEFUL_SHUTDOWN_TIMEOUT_SECS,
            "Graceful shutdown initiated, waiting for connections to close"
        );
    });
}
