//! Kamus Library
//!
//! This library contains the core components of Kamus, a persistent
//! word→meaning dictionary backed by a prefix tree. The library is used by
//! the `kamus` binary, but can also be used as a dependency by other
//! projects.
//!
//! # Architecture
//!
//! Kamus is designed with the following principles in mind:
//! - One freestanding, owned dictionary value with no global state
//! - Infallible in-memory operations, explicit errors for persistence
//! - Layered configuration (defaults, file, environment)
//! - Structured logging through `tracing`

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::{KamusTrie, KamusTrieError, KamusTrieResult, Lookup};

/// Version information for Kamus.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
