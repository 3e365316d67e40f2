//! Error types for Repform
//!
//! Frame evaluation itself is infallible: missing landmarks, unknown
//! exercises and degenerate geometry all degrade to safe defaults. Errors
//! only arise from configuration loading and adapter payload parsing.

use thiserror::Error;

/// Errors that can occur during configuration and payload parsing
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid exercise profile: {0}")]
    InvalidProfile(String),

    #[error("Profile table is missing the required 'default' entry")]
    MissingDefaultProfile,

    #[error("Unknown joint name: {0}")]
    UnknownJoint(String),

    #[error("Invalid frame dimensions: {0}")]
    InvalidFrameDimensions(String),
}
