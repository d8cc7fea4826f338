//! Error types for zonesync
//!
//! This module defines all error types used throughout the workspace.
//! Nothing here is retried: every variant surfaces to the caller as-is.

use thiserror::Error;

/// Result type alias for zonesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zonesync
#[derive(Error, Debug)]
pub enum Error {
    /// Login was rejected by the provider
    #[error("Authentication failed: {short_message} ({long_message})")]
    Authentication {
        /// Provider's short message
        short_message: String,
        /// Provider's long message
        long_message: String,
    },

    /// An action answered with a status other than "success"
    #[error("Action {action} failed: {short_message} ({long_message})")]
    ProviderAction {
        /// Action name (e.g. "infoDnsRecords")
        action: String,
        /// Provider's short message
        short_message: String,
        /// Provider's long message
        long_message: String,
    },

    /// Network or HTTP level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A wire value could not be decoded (e.g. a non-numeric string-encoded integer)
    #[error("Decode error: {0}")]
    Decode(String),

    /// The operation is not supported by this provider
    #[error("{operation} is not implemented by provider {provider}")]
    NotImplemented {
        /// Provider name
        provider: String,
        /// Operation name
        operation: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an authentication error from the provider's messages
    pub fn auth(short_message: impl Into<String>, long_message: impl Into<String>) -> Self {
        Self::Authentication {
            short_message: short_message.into(),
            long_message: long_message.into(),
        }
    }

    /// Create a failed-action error from the provider's messages
    pub fn provider_action(
        action: impl Into<String>,
        short_message: impl Into<String>,
        long_message: impl Into<String>,
    ) -> Self {
        Self::ProviderAction {
            action: action.into(),
            short_message: short_message.into(),
            long_message: long_message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a "not implemented" error
    pub fn not_implemented(provider: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            provider: provider.into(),
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
