// Application state module
// Shared, read-only view of configuration handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::listing::PublicRoot;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Injected public root used by the listing endpoint
    pub public_root: PublicRoot,
    /// Set when SIGINT/SIGTERM asks the accept loop to stop
    pub shutdown: Arc<tokio::sync::Notify>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let public_root = PublicRoot::new(
            &config.listing.public_root,
            config.listing.confine_to_root,
        );

        Self {
            config: config.clone(),
            public_root,
            shutdown: Arc::new(tokio::sync::Notify::new()),
        }
    }

    /// Whether per-request access log lines are written
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
