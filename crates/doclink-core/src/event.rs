//! Lifecycle event abstractions.
//!
//! Every resolution publishes exactly one completion event. Events are
//! snapshots: once built they are only ever cloned, never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::code::{ErrorCode, InvocationContext};
use crate::location::ErrorDescriptionLocation;

/// Event type emitted when a description location was found.
pub const WITH_DESCRIPTION_LOCATION: &str =
    "invocation.completed.description_location_for.with_description_location";

/// Event type emitted when no description location could be found.
pub const WITHOUT_DESCRIPTION_LOCATION: &str =
    "invocation.completed.description_location_for.without_description_location";

/// Metadata attached to every lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for routing.
    pub event_type: String,
    /// Correlation ID copied from the invocation context.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Emitted when a resolution completed with a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithDescriptionLocation {
    /// The code that was resolved.
    pub error_code: ErrorCode,
    /// The context of the invocation that produced this event.
    pub invocation_context: InvocationContext,
    /// The location found, from the cache or the lookup.
    pub location: ErrorDescriptionLocation,
}

/// Emitted when a resolution completed without a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithoutDescriptionLocation {
    /// The code that was resolved.
    pub error_code: ErrorCode,
    /// The context of the invocation that produced this event.
    pub invocation_context: InvocationContext,
}

/// Completed "description location for" outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LifecycleEventKind {
    /// A location was found.
    WithDescriptionLocation(WithDescriptionLocation),
    /// No location was found anywhere.
    WithoutDescriptionLocation(WithoutDescriptionLocation),
}

/// Lifecycle event envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: LifecycleEventKind,
}

impl LifecycleEvent {
    /// Builds the completion event for one invocation.
    #[must_use]
    pub fn completed(
        error_code: ErrorCode,
        invocation_context: InvocationContext,
        location: Option<ErrorDescriptionLocation>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        let correlation_id = invocation_context.correlation_id;
        let kind = match location {
            Some(location) => LifecycleEventKind::WithDescriptionLocation(WithDescriptionLocation {
                error_code,
                invocation_context,
                location,
            }),
            None => LifecycleEventKind::WithoutDescriptionLocation(WithoutDescriptionLocation {
                error_code,
                invocation_context,
            }),
        };
        let event_type = match &kind {
            LifecycleEventKind::WithDescriptionLocation(_) => WITH_DESCRIPTION_LOCATION,
            LifecycleEventKind::WithoutDescriptionLocation(_) => WITHOUT_DESCRIPTION_LOCATION,
        };

        Self {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                correlation_id,
                occurred_at,
            },
            kind,
        }
    }

    /// The code passed to the invocation.
    #[must_use]
    pub fn error_code(&self) -> &ErrorCode {
        match &self.kind {
            LifecycleEventKind::WithDescriptionLocation(payload) => &payload.error_code,
            LifecycleEventKind::WithoutDescriptionLocation(payload) => &payload.error_code,
        }
    }

    /// The context passed to the invocation.
    #[must_use]
    pub fn invocation_context(&self) -> &InvocationContext {
        match &self.kind {
            LifecycleEventKind::WithDescriptionLocation(payload) => &payload.invocation_context,
            LifecycleEventKind::WithoutDescriptionLocation(payload) => &payload.invocation_context,
        }
    }

    /// The location found, or `None` for the without-location outcome.
    #[must_use]
    pub fn location(&self) -> Option<&ErrorDescriptionLocation> {
        match &self.kind {
            LifecycleEventKind::WithDescriptionLocation(payload) => Some(&payload.location),
            LifecycleEventKind::WithoutDescriptionLocation(_) => None,
        }
    }
}

impl DomainEvent for LifecycleEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            LifecycleEventKind::WithDescriptionLocation(_) => WITH_DESCRIPTION_LOCATION,
            LifecycleEventKind::WithoutDescriptionLocation(_) => WITHOUT_DESCRIPTION_LOCATION,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("LifecycleEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

/// Selects which lifecycle events a subscriber receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event.
    #[default]
    All,
    /// Only resolutions that found a location.
    WithDescriptionLocation,
    /// Only resolutions that found nothing.
    WithoutDescriptionLocation,
}

impl EventFilter {
    /// Returns whether `event` passes this filter.
    #[must_use]
    pub fn matches(self, event: &LifecycleEvent) -> bool {
        match (self, &event.kind) {
            (Self::All, _)
            | (Self::WithDescriptionLocation, LifecycleEventKind::WithDescriptionLocation(_))
            | (
                Self::WithoutDescriptionLocation,
                LifecycleEventKind::WithoutDescriptionLocation(_),
            ) => true,
            _ => false,
        }
    }
}
