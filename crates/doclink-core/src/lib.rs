//! Doclink Core — shared domain abstractions.
//!
//! This crate defines the value types, lifecycle events and collaborator
//! traits that the resolution service and its adapters depend on. It
//! contains no infrastructure code.

pub mod clock;
pub mod code;
pub mod error;
pub mod event;
pub mod location;
pub mod repository;
