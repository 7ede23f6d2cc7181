//! Error types for the milsym feature append tooling.
//!
//! Run-level failures ([`RunError`]) abort a batch and carry a stable exit
//! code. Per-feature failures ([`FeatureError`]) are logged by the caller and
//! the feature is skipped. All errors are serializable so the CLI can emit
//! them as structured JSON.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Result type alias using MilsymError as the error type.
pub type Result<T> = std::result::Result<T, MilsymError>;

/// Top-level error type for all milsym operations.
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum MilsymError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Run-level failures with an exit code
    #[error("Run error: {0}")]
    Run(#[from] RunError),

    /// Feature store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Internal errors that shouldn't normally occur
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MilsymError {
    /// Creates an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the process exit code for this error.
    ///
    /// Configuration problems are reported like a failed data-file load.
    pub fn exit_code(&self) -> i32 {
        match self {
            MilsymError::Run(e) => e.code(),
            MilsymError::Config(_) => RunError::CONFIG_LOAD_FAILURE,
            _ => RunError::OTHER,
        }
    }
}

/// Run-level failures.
///
/// Any of these short-circuits the whole run. Codes are stable and used as
/// process exit codes.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum RunError {
    /// Rule table, field mapping or symbol library failed to load
    #[error("Failed to load dependent data files: {reason}")]
    ConfigLoadFailure { reason: String },

    /// Input feature class is absent or cannot be opened
    #[error("Input dataset does not exist or can't be opened: {name}")]
    InputNotFound { name: String },

    /// No input SIDC matched any routing rule
    #[error("No military features found in input: {name}")]
    NoMatchingFeatures { name: String },

    /// Output workspace or feature class is absent or cannot be opened
    #[error("Output workspace does not exist or can't be opened: {name}")]
    OutputNotFound { name: String },

    /// Exclusive schema lock unavailable on an output class
    #[error("Exclusive schema lock could not be obtained on {class}")]
    SchemaLockDenied { class: String },

    /// Input lacks the configured SIDC field
    #[error("No [{field}] field in input data")]
    InputFieldMissing { field: String },

    /// Anything else
    #[error("Other/unknown error: {reason}")]
    Other { reason: String },
}

impl RunError {
    pub const NO_ERROR: i32 = 0;
    pub const CONFIG_LOAD_FAILURE: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
    pub const NO_MATCHING_FEATURES: i32 = 3;
    pub const OUTPUT_NOT_FOUND: i32 = 4;
    pub const SCHEMA_LOCK_DENIED: i32 = 5;
    pub const INPUT_FIELD_MISSING: i32 = 6;
    pub const OTHER: i32 = 99;

    /// Creates a config load failure.
    pub fn config_load(reason: impl Into<String>) -> Self {
        Self::ConfigLoadFailure {
            reason: reason.into(),
        }
    }

    /// Creates an input not found error.
    pub fn input_not_found(name: impl Into<String>) -> Self {
        Self::InputNotFound { name: name.into() }
    }

    /// Creates an output not found error.
    pub fn output_not_found(name: impl Into<String>) -> Self {
        Self::OutputNotFound { name: name.into() }
    }

    /// Creates a schema lock error.
    pub fn schema_lock_denied(class: impl Into<String>) -> Self {
        Self::SchemaLockDenied {
            class: class.into(),
        }
    }

    /// Creates a missing SIDC field error.
    pub fn input_field_missing(field: impl Into<String>) -> Self {
        Self::InputFieldMissing {
            field: field.into(),
        }
    }

    /// Returns the stable numeric code.
    pub fn code(&self) -> i32 {
        match self {
            RunError::ConfigLoadFailure { .. } => Self::CONFIG_LOAD_FAILURE,
            RunError::InputNotFound { .. } => Self::INPUT_NOT_FOUND,
            RunError::NoMatchingFeatures { .. } => Self::NO_MATCHING_FEATURES,
            RunError::OutputNotFound { .. } => Self::OUTPUT_NOT_FOUND,
            RunError::SchemaLockDenied { .. } => Self::SCHEMA_LOCK_DENIED,
            RunError::InputFieldMissing { .. } => Self::INPUT_FIELD_MISSING,
            RunError::Other { .. } => Self::OTHER,
        }
    }

    /// Returns the generic meaning of a numeric code.
    pub fn meaning(code: i32) -> &'static str {
        match code {
            Self::NO_ERROR => "No Error",
            Self::CONFIG_LOAD_FAILURE => "Failed to load dependent data files",
            Self::INPUT_NOT_FOUND => "Input Dataset does not exist/can't be opened",
            Self::NO_MATCHING_FEATURES => "No military features found in input",
            Self::OUTPUT_NOT_FOUND => "Output GDB does not exist/can't be opened",
            Self::SCHEMA_LOCK_DENIED => "Exclusive Schema Lock could not be obtained on Output GDB",
            Self::INPUT_FIELD_MISSING => "No [SIDC] field in input data",
            _ => "Other/Unknown",
        }
    }
}

/// Per-feature failures.
///
/// These never abort a run. The feature (or the sub-step) is skipped and the
/// loop continues.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FeatureError {
    /// SIDC failed validation
    #[error("Invalid SIDC: {sidc}")]
    InvalidSidc { sidc: String },

    /// Masked code has no symbol library entry
    #[error("Missing dictionary entry for {key}")]
    MissingDictionaryEntry { key: String },

    /// Input and output field types differ
    #[error("Field type mismatch for {field}: input {input_type}, output {output_type}")]
    FieldTypeMismatch {
        field: String,
        input_type: String,
        output_type: String,
    },

    /// No representation rule could be found or created
    #[error("Could not resolve representation rule for '{name}'")]
    RuleResolution { name: String },
}

/// Errors raised by a feature store.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum StoreError {
    /// Workspace could not be opened
    #[error("Workspace not found: {path}")]
    WorkspaceNotFound { path: String },

    /// Feature class does not exist
    #[error("Feature class not found: {name}")]
    ClassNotFound { name: String },

    /// Field does not exist on the class
    #[error("Field '{field}' not found on {class}")]
    FieldNotFound { class: String, field: String },

    /// Write attempted outside an edit session
    #[error("No edit session is active")]
    NotEditing,

    /// A second edit session was requested
    #[error("An edit session is already active")]
    AlreadyEditing,

    /// Record reference does not exist
    #[error("Feature {id} not found in {class}")]
    FeatureNotFound { class: String, id: u64 },

    /// Workspace content could not be read or written
    #[error("Workspace serialization failed: {reason}")]
    Serialization { reason: String },
}

impl StoreError {
    /// Creates a class not found error.
    pub fn class_not_found(name: impl Into<String>) -> Self {
        Self::ClassNotFound { name: name.into() }
    }

    /// Creates a serialization error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }
}

/// Configuration errors.
///
/// These errors occur when loading, parsing, or validating configuration files,
/// rule tables and field mappings.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {reason}")]
    InvalidFormat { reason: String },

    /// Missing required configuration field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Match expression does not compile
    #[error("Invalid match expression in rule '{rule}': {reason}")]
    InvalidExpression { rule: String, reason: String },
}

impl ConfigError {
    /// Creates a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a load failed error.
    pub fn load_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Wrapper for I/O errors to make them serializable.
#[derive(Debug, Error, Serialize, Deserialize)]
#[error("I/O error: {kind:?}: {message}")]
pub struct IoError {
    pub kind: IoErrorKind,
    pub message: String,
}

impl From<io::Error> for IoError {
    fn from(err: io::Error) -> Self {
        Self {
            kind: err.kind().into(),
            message: err.to_string(),
        }
    }
}

impl From<io::Error> for MilsymError {
    fn from(err: io::Error) -> Self {
        MilsymError::Io(err.into())
    }
}

/// Serializable subset of std::io::ErrorKind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum IoErrorKind {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    InvalidInput,
    InvalidData,
    UnexpectedEof,
    Other,
}

impl From<io::ErrorKind> for IoErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => IoErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            io::ErrorKind::AlreadyExists => IoErrorKind::AlreadyExists,
            io::ErrorKind::InvalidInput => IoErrorKind::InvalidInput,
            io::ErrorKind::InvalidData => IoErrorKind::InvalidData,
            io::ErrorKind::UnexpectedEof => IoErrorKind::UnexpectedEof,
            _ => IoErrorKind::Other,
        }
    }
}
