//! Test modules for Kamus.
//!
//! This module contains crate-level testing infrastructure:
//! - Configuration loading and validation tests
//! - Error type and reporter tests
//! - Property-based tests for the dictionary trie
//! - Shared fixtures and proptest strategies
