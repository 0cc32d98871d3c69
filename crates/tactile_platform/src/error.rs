//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Unrecognised input event name
    #[error("Unknown input event kind: {0}")]
    UnknownEventKind(String),

    /// Unrecognised device class name
    #[error("Unknown device class: {0}")]
    UnknownDevice(String),

    /// Unrecognised document compatibility mode
    #[error("Unknown compatibility mode: {0}")]
    UnknownCompatMode(String),

    /// Unrecognised listener target name
    #[error("Unknown listen target: {0}")]
    UnknownTarget(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
