//! Shared application state.

use std::sync::Arc;

use doclink_reporting::ErrorReporter;
use doclink_resolution::ResolutionService;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The resolution service. Disposed by the binary on shutdown.
    pub service: Arc<ResolutionService>,
    /// Renders localized log lines for failures.
    pub reporter: Arc<ErrorReporter>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(service: Arc<ResolutionService>, reporter: Arc<ErrorReporter>) -> Self {
        Self { service, reporter }
    }
}
