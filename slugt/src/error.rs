//! Error handling module for the slugt CLI.
//!
//! This module provides custom error types using `thiserror` for
//! structured error handling throughout the application.

use thiserror::Error;

/// Main error type for the slugt CLI application.
#[derive(Error, Debug)]
pub enum SlugtError {
    /// Error when loading or interpreting configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error from the suggestion engine or its provider.
    #[error("Suggestion error: {0}")]
    Suggest(#[from] slug_suggest::SuggestError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when parsing a TOML configuration file fails.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using SlugtError.
pub type Result<T> = std::result::Result<T, SlugtError>;
