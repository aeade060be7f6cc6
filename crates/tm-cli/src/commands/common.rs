//! Shared utilities for CLI commands

use std::fmt;
use tokio::signal;

/// Exit status for a process interrupted by SIGINT
pub(crate) const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: main.rs downcasts and exits; the message was already printed
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Resolve when the process receives Ctrl+C (or SIGTERM on unix).
///
/// If a handler cannot be installed that signal is simply never observed.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::warn!("Received Ctrl+C, cancelling"),
        _ = terminate => log::warn!("Received terminate signal, cancelling"),
    }
}

/// Pluralize `word` for `count`
pub(crate) fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
