//! Error types for Gloss core operations.
//!
//! Only configuration handling and root validation can fail. Directory
//! listings and content searches absorb filesystem errors and degrade to
//! "no entries" / "no matches", so they never return these errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GlossError
pub type Result<T> = std::result::Result<T, GlossError>;

/// Core error types for Gloss operations.
#[derive(Error, Debug)]
pub enum GlossError {
    /// The requested root folder does not exist or is not a directory
    #[error("not a folder: {path}")]
    InvalidRoot { path: PathBuf },

    /// No root was given and none is configured
    #[error("no folder given and no default_root configured")]
    NoRoot,

    /// Configuration file parsing or serialization failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlossError {
    /// Returns true if the user can fix this by choosing another folder
    pub fn is_root_error(&self) -> bool {
        matches!(self, GlossError::InvalidRoot { .. } | GlossError::NoRoot)
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        GlossError::ConfigError {
            reason: reason.into(),
        }
    }
}
