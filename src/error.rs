//! Error types for profile-bot.

use crate::profile::state::DialogPhase;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// State store errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Profile dialog errors.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("No active dialog for conversation {conversation}")]
    NotActive { conversation: String },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: DialogPhase, to: DialogPhase },

    #[error("State store error: {0}")]
    Store(#[from] DatabaseError),
}

/// Publish (zip + upload) errors.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to build archive {path}: {reason}")]
    Archive { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upload rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
