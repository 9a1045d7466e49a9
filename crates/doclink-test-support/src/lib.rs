//! Shared test mocks and utilities for the doclink error description resolver.

mod clock;
mod lookup;
mod store;

pub use clock::FixedClock;
pub use lookup::{CountingLookup, FailingLookup, GatedLookup};
pub use store::{EmptyCacheStore, FailingCacheStore, RecordingCacheStore};

use doclink_core::code::ErrorCode;
use doclink_core::location::ErrorDescriptionLocation;
use url::Url;

/// Builds an external location under `https://docs.example.com/errors/`.
///
/// # Panics
///
/// Panics if `code` cannot form a valid URL path segment.
#[must_use]
pub fn location_for(code: &ErrorCode) -> ErrorDescriptionLocation {
    let uri = Url::parse(&format!("https://docs.example.com/errors/{code}"))
        .expect("test location URL is valid");
    ErrorDescriptionLocation::external(uri, code.clone())
}
