//! In-process lifecycle event bus.
//!
//! Publishing never waits on subscribers. Each subscription owns its own
//! receive buffer, so a slow subscriber only ever lags itself.

use doclink_core::event::{DomainEvent, EventFilter, LifecycleEvent};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Multicasts lifecycle events to any number of subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LifecycleEvent>,
    closed: CancellationToken,
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            closed: CancellationToken::new(),
        }
    }

    /// Send an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see the event. Events
    /// published after `close` are dropped.
    pub fn publish(&self, event: LifecycleEvent) -> usize {
        if self.closed.is_cancelled() {
            debug!(event_type = event.event_type(), "event bus closed, dropping event");
            return 0;
        }
        match self.sender.send(event) {
            Ok(count) => count,
            Err(broadcast::error::SendError(event)) => {
                debug!(event_type = event.event_type(), "no subscribers for event");
                0
            }
        }
    }

    /// Receive events matching `filter` published from now on.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            filter,
            closed: self.closed.clone(),
        }
    }

    /// Terminate every subscription. Idempotent.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Returns whether `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}

/// A lazy, unbounded sequence of lifecycle events.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<LifecycleEvent>,
    filter: EventFilter,
    closed: CancellationToken,
}

impl Subscription {
    /// Wait for the next matching event.
    ///
    /// Events already buffered are still handed out after the bus closes;
    /// `None` is returned once the bus is closed and the buffer is drained.
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        loop {
            let received = tokio::select! {
                biased;
                received = self.receiver.recv() => received,
                () = self.closed.cancelled() => match self.receiver.try_recv() {
                    Ok(event) => Ok(event),
                    Err(_) => return None,
                },
            };
            match received {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "lifecycle event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// The filter this subscription was created with.
    #[must_use]
    pub fn filter(&self) -> EventFilter {
        self.filter
    }
}
