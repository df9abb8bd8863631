//! # Engine Error Types
//!
//! The only fallible surface is configuration: loading and validation.
//! Runtime degeneracies (zero glyphs, zero max distance, zero measured
//! height, missing geometry) are policy fallbacks, never errors.

use thiserror::Error;

/// Errors that can occur while building an engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config file {path}")]
    ConfigIo {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse config file {path}")]
    ConfigParse {
        /// Path that was attempted.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
