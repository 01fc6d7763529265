//! Data structures for Kamus.
//!
//! This module contains the dictionary trie and its file codec.
//! Implementations follow the project requirements:
//! - No unsafe code
//! - Single owner, no interior mutability
//! - Total operations: only persistence can fail

pub mod kamus_trie;

// Re-export common data structures
pub use kamus_trie::{KamusTrie, KamusTrieError, KamusTrieResult, Lookup, Words};
