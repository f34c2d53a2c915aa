//! # World Error Types
//!
//! The world API itself never fails: every coordinate query degrades to air,
//! a no-op or "no hit". The only fallible surface is configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::WorldConfig`].
#[derive(Error, Debug)]
pub enum WorldError {
    /// The configuration file could not be read.
    #[error("could not read world config {path:?}: {source}")]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a `WorldConfig`.
    #[error("could not parse world config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds values the world cannot run with.
    #[error("invalid world config: {0}")]
    InvalidConfig(String),
}

/// Result type for configuration operations.
pub type WorldResult<T> = Result<T, WorldError>;
