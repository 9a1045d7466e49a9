//! Single-flight lookup coalescing.
//!
//! Concurrent misses for the same code share one call to the wrapped
//! lookup. Off by default; see `ResolutionConfig::coalesce_lookups`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use doclink_core::code::{ErrorCode, InvocationContext};
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::DescriptionLookup;
use tokio::sync::broadcast;
use tracing::debug;

type LookupResult = Result<Option<ErrorDescriptionLocation>, ServiceError>;
type InFlight = Arc<Mutex<HashMap<ErrorCode, broadcast::Sender<LookupResult>>>>;

/// Wraps a `DescriptionLookup` so that at most one call per code is pending.
pub struct CoalescingLookup<L: ?Sized> {
    in_flight: InFlight,
    inner: Arc<L>,
}

impl<L: DescriptionLookup + ?Sized> CoalescingLookup<L> {
    /// Decorate `inner`.
    #[must_use]
    pub fn new(inner: Arc<L>) -> Self {
        Self {
            in_flight: Arc::default(),
            inner,
        }
    }

    /// Number of codes with a lookup currently pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.in_flight).len()
    }

    #[cfg(test)]
    fn followers(&self, code: &ErrorCode) -> usize {
        lock(&self.in_flight)
            .get(code)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

enum Role {
    Leader(LeaderSlot),
    Follower(broadcast::Receiver<LookupResult>),
}

/// Removes the pending entry when the leading call finishes or is dropped.
struct LeaderSlot {
    in_flight: InFlight,
    code: ErrorCode,
    sender: broadcast::Sender<LookupResult>,
}

impl LeaderSlot {
    fn complete(self, result: &LookupResult) {
        lock(&self.in_flight).remove(&self.code);
        // Followers subscribed while the entry was present, so they all see this.
        let _ = self.sender.send(result.clone());
    }
}

impl Drop for LeaderSlot {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.in_flight);
        if in_flight
            .get(&self.code)
            .is_some_and(|sender| sender.same_channel(&self.sender))
        {
            in_flight.remove(&self.code);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<L: DescriptionLookup + ?Sized> CoalescingLookup<L> {
    fn join(&self, code: &ErrorCode) -> Role {
        let mut in_flight = lock(&self.in_flight);
        if let Some(sender) = in_flight.get(code) {
            return Role::Follower(sender.subscribe());
        }
        let (sender, _) = broadcast::channel(1);
        in_flight.insert(code.clone(), sender.clone());
        Role::Leader(LeaderSlot {
            in_flight: Arc::clone(&self.in_flight),
            code: code.clone(),
            sender,
        })
    }
}

#[async_trait]
impl<L: DescriptionLookup + ?Sized> DescriptionLookup for CoalescingLookup<L> {
    async fn lookup(&self, code: &ErrorCode, context: &InvocationContext) -> LookupResult {
        loop {
            match self.join(code) {
                Role::Leader(slot) => {
                    let result = self.inner.lookup(code, context).await;
                    slot.complete(&result);
                    return result;
                }
                Role::Follower(mut receiver) => {
                    if let Ok(result) = receiver.recv().await {
                        debug!(error_code = %code, "joined in-flight lookup");
                        return result;
                    }
                    // The leader was abandoned before answering; try again.
                }
            }
        }
    }
}
