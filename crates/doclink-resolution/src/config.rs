//! Resolution service configuration.

use std::time::Duration;

/// Tunables for a `ResolutionService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Events buffered per subscriber before a slow subscriber starts lagging.
    pub event_capacity: usize,
    /// Share one in-flight lookup between concurrent misses for the same code.
    pub coalesce_lookups: bool,
    /// Upper bound on how long disposal waits for pending cache write-backs.
    pub drain_timeout: Duration,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
            coalesce_lookups: false,
            drain_timeout: Duration::from_secs(5),
        }
    }
}
