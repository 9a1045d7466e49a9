//! Lifecycle event logging.

use doclink_core::event::DomainEvent;
use doclink_resolution::Subscription;
use tokio::task::JoinHandle;
use tracing::info;

/// Logs every event from `subscription` until the bus closes. Returns the
/// number of events logged.
pub fn spawn_event_logger(mut subscription: Subscription) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut logged = 0;
        while let Some(event) = subscription.recv().await {
            let metadata = event.metadata();
            info!(
                event_type = event.event_type(),
                event_id = %metadata.event_id,
                correlation_id = %metadata.correlation_id,
                error_code = %event.error_code(),
                location = event.location().map(|l| l.uri().as_str()),
                "resolution completed"
            );
            logged += 1;
        }
        logged
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use doclink_core::code::{ErrorCode, InvocationContext};
    use doclink_core::event::EventFilter;
    use doclink_resolution::ResolutionService;
    use doclink_test_support::{CountingLookup, EmptyCacheStore};

    use super::*;

    #[tokio::test]
    async fn test_logger_stops_when_service_is_disposed() {
        // Arrange
        let service = ResolutionService::builder()
            .cache(Arc::new(EmptyCacheStore))
            .lookup(Arc::new(CountingLookup::empty()))
            .build()
            .unwrap();
        let logger = spawn_event_logger(service.events(EventFilter::All));

        // Act
        for code in ["a", "b"] {
            service
                .description_location_for(&ErrorCode::new(code), &InvocationContext::new_instance())
                .await
                .unwrap();
        }
        service.dispose().await;

        // Assert
        assert_eq!(logger.await.unwrap(), 2);
    }
}
