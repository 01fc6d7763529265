//! Dictionary configuration module.
//!
//! This module defines where the dictionary file lives.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default dictionary file, relative to the working directory.
pub const DEFAULT_DICTIONARY_PATH: &str = "kamus.csv";

/// Dictionary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Path of the CSV file the dictionary is loaded from and saved to
    pub path: PathBuf,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
        }
    }
}

impl Validate for DictionaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "dictionary path must not be empty".to_string(),
            ));
        }

        if self.path.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "dictionary path {:?} is a directory",
                self.path
            )));
        }

        Ok(())
    }
}
