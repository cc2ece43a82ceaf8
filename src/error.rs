//! Error types for the savings advisor client

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Failure taxonomy for the client.
///
/// The gateway collapses every outcome into one of the first three variants.
/// Sessions never distinguish kinds, only success/failure, so past the
/// gateway boundary the variant mostly matters for the displayed message.
#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Gateway Failures
    // =============================

    #[error("Connection failed: {0}")]
    Transport(String),

    #[error("Service error: {0}")]
    Protocol(String),

    #[error("Analysis service reported: {0}")]
    Application(String),

    // =============================
    // Startup / Configuration
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
