//! Application layer errors

use thiserror::Error;
use crate::domain::entities::TransitionError;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Errors raised by the connection to the messaging service
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to register command /{name}: {reason}")]
    CommandRegistration { name: String, reason: String },

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Lifecycle(#[from] TransitionError),
}
