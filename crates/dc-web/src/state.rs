//! Shared application state

use tokio::sync::watch;

use crate::config::AppConfig;

/// State shared by all request handlers
#[derive(Debug)]
pub struct AppState {
    /// Server configuration
    pub config: AppConfig,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    /// Wrap a loaded configuration
    pub fn new(config: AppConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self { config, shutdown }
    }

    /// Tell running simulations to stop starting new batches
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Receiver that flips to `true` once shutdown begins
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}
