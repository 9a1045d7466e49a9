//! Route modules.

pub mod errors;
pub mod health;
