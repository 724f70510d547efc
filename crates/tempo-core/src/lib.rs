//! Tempo Core - Foundational types for the Tempo crates
//!
//! This crate provides the types that every other Tempo crate depends on:
//! - `SystemState` - Per-invocation time snapshot handed to systems
//! - Error types and Result alias

mod error;
mod state;

pub use error::{Result, TempoError};
pub use state::SystemState;
