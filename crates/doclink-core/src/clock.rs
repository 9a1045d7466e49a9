//! Time source for lifecycle event timestamps.

use chrono::{DateTime, Utc};

/// Supplies `occurred_at` for published lifecycle events and `created_at`
/// for threaded invocation contexts. Tests pin it to a fixed instant.
pub trait Clock: Send + Sync {
    /// The instant to stamp on the next event or context.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used unless the service builder is given another clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
