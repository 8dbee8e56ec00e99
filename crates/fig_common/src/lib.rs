//! Common types and errors for FigDeck
//!
//! This crate provides the shared error taxonomy and telemetry setup used
//! across all FigDeck components.

pub mod telemetry;

use thiserror::Error;

/// Core error types for FigDeck operations
#[derive(Error, Debug)]
pub enum FigError {
    #[error("Invalid Figma reference: {0}")]
    InvalidLocator(String),

    #[error("Figma API request failed: {0}")]
    FetchFailed(String),

    #[error("Malformed node payload: {0}")]
    MalformedNode(String),

    #[error("Cycle detected in document tree")]
    CycleDetected,

    #[error("Document tree exceeds traversal depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FigError>;

/// Exit code constants
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 101;
