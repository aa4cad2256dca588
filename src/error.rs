//! Error types for CareGP Chat
//!
//! This module defines the error types used throughout the gateway,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for gateway operations
///
/// Covers configuration loading, model provider calls and session log
/// persistence. Fail-soft conditions (missing knowledge document, missing or
/// malformed session log) are not errors and never appear here.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Session log storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for gateway operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`ChatError`].
pub type Result<T> = anyhow::Result<T>;
