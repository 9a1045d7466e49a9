//! The cache-aside resolution service.
//!
//! For each call the cache store is read first. On a hit the authoritative
//! lookup is skipped. On a miss the lookup runs and any location it finds
//! is written back in the background. Either way exactly one completion
//! event is published before the result is returned.

use std::sync::Arc;

use doclink_core::clock::{Clock, SystemClock};
use doclink_core::code::{ErrorCode, InvocationContext};
use doclink_core::error::ServiceError;
use doclink_core::event::{EventFilter, LifecycleEvent};
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::{CacheStore, DescriptionLookup};
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

use crate::bus::{EventBus, Subscription};
use crate::coalescing::CoalescingLookup;
use crate::config::ResolutionConfig;

/// Resolves error codes to description locations.
pub struct ResolutionService {
    cache: Arc<dyn CacheStore>,
    lookup: Arc<dyn DescriptionLookup>,
    clock: Arc<dyn Clock>,
    bus: EventBus,
    write_backs: TaskTracker,
    config: ResolutionConfig,
}

impl ResolutionService {
    /// Start assembling a service.
    #[must_use]
    pub fn builder() -> ResolutionServiceBuilder {
        ResolutionServiceBuilder::default()
    }

    /// Resolve the description location for `code`.
    ///
    /// Returns `Ok(None)` when no location exists anywhere; absence is not a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Disposed` after `dispose`, and propagates
    /// cache store or lookup failures unchanged.
    #[instrument(
        skip(self, code, context),
        fields(error_code = %code, correlation_id = %context.correlation_id)
    )]
    pub async fn description_location_for(
        &self,
        code: &ErrorCode,
        context: &InvocationContext,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        if self.bus.is_closed() {
            return Err(ServiceError::Disposed);
        }

        let location = if let Some(cached) = self.cache.retrieve(code).await? {
            debug!("cache hit");
            Some(cached)
        } else {
            debug!("cache miss, consulting lookup");
            let found = self.lookup.lookup(code, context).await?;
            if let Some(location) = &found {
                self.write_back(code.clone(), location.clone());
            }
            found
        };

        let event = LifecycleEvent::completed(
            code.clone(),
            context.clone(),
            location.clone(),
            self.clock.now(),
        );
        let receivers = self.bus.publish(event);
        debug!(receivers, found = location.is_some(), "published completion event");

        Ok(location)
    }

    /// Observe lifecycle events matching `filter` from now on.
    #[must_use]
    pub fn events(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Stop accepting calls, terminate every event subscription, and wait
    /// (bounded by `ResolutionConfig::drain_timeout`) for pending cache
    /// write-backs. Safe to call more than once.
    pub async fn dispose(&self) {
        if !self.bus.is_closed() {
            info!("disposing resolution service");
        }
        self.bus.close();
        self.write_backs.close();
        if tokio::time::timeout(self.config.drain_timeout, self.write_backs.wait())
            .await
            .is_err()
        {
            warn!(
                pending = self.write_backs.len(),
                "abandoning cache write-backs still pending at disposal"
            );
        }
    }

    /// Returns whether `dispose` has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.bus.is_closed()
    }

    /// Schedule `(code, location)` to be written to the cache store. The
    /// caller's result never waits on the write.
    fn write_back(&self, code: ErrorCode, location: ErrorDescriptionLocation) {
        let cache = Arc::clone(&self.cache);
        self.write_backs.spawn(async move {
            if let Err(err) = cache.store(&code, &location).await {
                warn!(error_code = %code, error = %err, "cache write-back failed");
            }
        });
    }
}

impl Drop for ResolutionService {
    fn drop(&mut self) {
        self.bus.close();
        self.write_backs.close();
    }
}

impl std::fmt::Debug for ResolutionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionService")
            .field("disposed", &self.is_disposed())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Assembles a `ResolutionService` from its collaborators.
#[derive(Default)]
pub struct ResolutionServiceBuilder {
    cache: Option<Arc<dyn CacheStore>>,
    lookup: Option<Arc<dyn DescriptionLookup>>,
    clock: Option<Arc<dyn Clock>>,
    config: ResolutionConfig,
}

impl ResolutionServiceBuilder {
    /// The cache store consulted first.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The authoritative lookup consulted on a miss.
    #[must_use]
    pub fn lookup(mut self, lookup: Arc<dyn DescriptionLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Clock used to timestamp events. Defaults to the system clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Service tunables.
    #[must_use]
    pub fn config(mut self, config: ResolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the service.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Configuration` if the cache store or the
    /// lookup was not provided.
    pub fn build(self) -> Result<ResolutionService, ServiceError> {
        let cache = self
            .cache
            .ok_or_else(|| ServiceError::Configuration("cache store is required".to_owned()))?;
        let mut lookup = self
            .lookup
            .ok_or_else(|| ServiceError::Configuration("lookup is required".to_owned()))?;
        if self.config.coalesce_lookups {
            lookup = Arc::new(CoalescingLookup::new(lookup));
        }

        Ok(ResolutionService {
            cache,
            lookup,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            bus: EventBus::new(self.config.event_capacity),
            write_backs: TaskTracker::new(),
            config: self.config,
        })
    }
}
