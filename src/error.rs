//! Error types for classrules.
//!
//! Uses thiserror for derive macros and provides actionable error messages.

use thiserror::Error;

/// Main error type for rule registration.
///
/// Everything here is a configuration-time failure. Whether a registered rule
/// passes or fails against data is reported through
/// [`Notification`](crate::context::Notification), never through this type.
#[derive(Error, Debug)]
pub enum RulesError {
    /// A builder call was made in an order the builder cannot honor, such as
    /// attaching a condition before any rule exists to condition.
    #[error("Invalid sequencing: {0}")]
    InvalidSequencing(String),

    /// A rule could not be constructed from the given parameters.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A declarative rule set could not be read, parsed, or validated.
    #[error("{0}")]
    ConfigError(String),

    /// A validation target could not be snapshotted for evaluation.
    #[error("Failed to snapshot validation target: {0}")]
    SnapshotError(String),
}

/// Result type alias for classrules operations.
pub type Result<T> = std::result::Result<T, RulesError>;
