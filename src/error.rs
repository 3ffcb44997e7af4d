//! Error types for the payslip engine.
//!
//! The calculation core is a total function and never fails. Everything that
//! can fail lives at the edges: loading tax tables, reading or writing the
//! persisted settings blob, and producing export documents. Those edges all
//! report through [`EngineError`].

use thiserror::Error;

/// The main error type for the payslip engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax.yaml");
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

    /// Configuration parsed but its contents are inconsistent.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A flat-rate preset id was not found in the configured presets.
    #[error("Tax preset not found: {id}")]
    PresetNotFound {
        /// The preset id that was requested.
        id: String,
    },

    /// The persisted settings blob could not be read or written.
    #[error("Settings error at '{path}': {message}")]
    SettingsError {
        /// The settings file path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An export document could not be produced.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
