// Signal handling module
//
// - SIGTERM: stop accepting, exit
// - SIGINT:  stop accepting, exit (Ctrl+C)
//
// In-flight requests are not waited for.

use crate::logger;

/// Resolves with the signal name once a shutdown signal arrives
///
/// If the handlers cannot be registered the error is logged and the future
/// never resolves, leaving the server running.
#[cfg(unix)]
pub async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                logger::log_error(&format!("Failed to register signal handlers: {e}"));
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM received",
        _ = sigint.recv() => "SIGINT received",
    }
}

/// Non-Unix fallback, only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "Ctrl+C received",
        Err(e) => {
            logger::log_error(&format!("Failed to register Ctrl+C handler: {e}"));
            std::future::pending().await
        }
    }
}
