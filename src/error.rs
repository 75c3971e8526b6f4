//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during attendance resolution.

use thiserror::Error;

use crate::device::DeviceError;

/// The main error type for the Attendance Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift window configuration value was out of range or inconsistent.
    #[error("Invalid window configuration '{field}': {message}")]
    InvalidWindowConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Every fetch attempt was exhausted without obtaining a single usable
    /// punch record.
    ///
    /// Transient device failures are retried inside the fetcher and never
    /// surface directly; this variant is the terminal outcome when even the
    /// best-available dataset is empty.
    #[error("No usable punch data after {attempts} attempt(s)")]
    DataUnavailable {
        /// How many fetch attempts were made before giving up.
        attempts: u32,
        /// The last underlying device error.
        #[source]
        source: DeviceError,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
