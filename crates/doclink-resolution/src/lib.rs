//! Doclink Resolution — cache-aside description resolution.
//!
//! Fronts a slow authoritative lookup with a cache store, writing found
//! locations back and publishing one lifecycle event per resolution.

pub mod bus;
pub mod coalescing;
pub mod config;
pub mod service;

pub use bus::{EventBus, Subscription};
pub use config::ResolutionConfig;
pub use service::{ResolutionService, ResolutionServiceBuilder};
