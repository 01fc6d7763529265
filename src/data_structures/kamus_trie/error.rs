// Copyright (c) 2025 Kamus Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Kamus Trie.
//!
//! Only persistence can fail. Lookups that miss are ordinary results and are
//! reported through `Option`, `bool` or [`Lookup`](super::Lookup).

use std::path::PathBuf;

/// Errors that can occur while saving or loading a Kamus Trie.
#[derive(Debug, thiserror::Error)]
pub enum KamusTrieError {
    /// The dictionary file could not be opened.
    #[error("Failed to open dictionary file {path:?}: {source}")]
    Open {
        /// Path of the dictionary file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing dictionary records failed.
    #[error("Dictionary I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record does not have exactly two fields.
    #[error("Malformed record {record}: expected 2 fields (word, meaning), found {fields}")]
    MalformedRecord {
        /// 1-based record number.
        record: usize,
        /// Number of fields found in the record.
        fields: usize,
    },

    /// A record field is not valid UTF-8.
    #[error("Record {record} is not valid UTF-8")]
    InvalidEncoding {
        /// 1-based record number.
        record: usize,
    },
}

/// Result type for Kamus Trie persistence operations
pub type KamusTrieResult<T> = Result<T, KamusTrieError>;
