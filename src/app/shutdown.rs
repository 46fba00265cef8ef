//! Graceful shutdown handling for training runs.
//!
//! The flag is checked between episodes, so a run always stops with every
//! reported fitness applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Manages graceful shutdown of the application. Clones share one flag.
#[derive(Clone, Debug)]
pub struct ShutdownManager {
    shutdown_requested: Arc<AtomicBool>,
    exit_code: i32,
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownManager {
    /// Creates a new shutdown manager.
    pub fn new() -> Self {
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            exit_code: 0,
        }
    }

    /// Requests shutdown.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        tracing::info!("Shutdown requested");
    }

    /// Checks if shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Sets the exit code.
    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = code;
    }

    /// Gets the exit code.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Waits for Ctrl-C, then requests shutdown.
    pub async fn wait_for_ctrl_c(self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Could not listen for Ctrl+C");
            return;
        }
        tracing::info!("Ctrl+C received, stopping after the current episode...");
        self.request_shutdown();
    }
}
