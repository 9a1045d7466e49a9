//! Doclink Store — adapters for the resolution service's collaborators.
//!
//! Cache stores (in-memory and `PostgreSQL`) and a mapping-backed
//! authoritative lookup.

pub mod mapped_lookup;
pub mod memory;
pub mod pg_cache_store;
pub mod schema;
