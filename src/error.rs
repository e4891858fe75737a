//! Error types for the break compliance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during compliance evaluation
//! and break scheduling.

use thiserror::Error;

/// The main error type for the break compliance engine.
///
/// Clearing notifications or clocking out an employee without an active
/// shift is a defined no-op and never produces one of these.
///
/// # Example
///
/// ```
/// use break_compliance::error::EngineError;
///
/// let error = EngineError::UnsupportedRegion {
///     region: "TX".to_string(),
/// };
/// assert_eq!(error.to_string(), "Rules for region 'TX' not implemented");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No rule set is registered for the requested region code or name.
    #[error("Rules for region '{region}' not implemented")]
    UnsupportedRegion {
        /// The region exactly as the caller supplied it.
        region: String,
    },

    /// Input could not be parsed or was structurally invalid.
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// A description of what was wrong with the input.
        message: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

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
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
