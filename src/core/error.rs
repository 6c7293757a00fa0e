//! Defines the custom error types for truelist-guard.

use std::io;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// Errors raised by a validation client talking to the Truelist API.
///
/// Only [`ClientError::Authentication`] is treated as fatal by the outcome
/// classifier; the other variants are considered transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The API rejected the credentials (missing or invalid API key).
    #[error("Authentication Error: {message}")]
    Authentication {
        /// Message reported by the API or the client.
        message: String,
        /// HTTP status code, when the error came from a response.
        status: Option<u16>,
    },

    /// The API could not be reached (DNS, connect, TLS, timeout).
    #[error("Connection Error: {0}")]
    Connection(String),

    /// The API answered, but not with a usable validation result.
    #[error("API Error (status {status:?}): {message}")]
    Api {
        /// HTTP status code, when one was received.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },
}

impl ClientError {
    /// Returns `true` for authentication failures.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ClientError::Authentication { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return ClientError::Connection(err.to_string());
        }
        let status = err.status().map(|s| s.as_u16());
        match status {
            Some(401) | Some(403) => ClientError::Authentication {
                message: err.to_string(),
                status,
            },
            _ => ClientError::Api {
                status,
                message: err.to_string(),
            },
        }
    }
}

/// The primary error type for truelist-guard.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., HTTP clients).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error raised by the validation client.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing the TOML configuration file.
    #[error("TOML Error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl AppError {
    /// Returns the client error carried by this error, if any.
    pub fn as_client_error(&self) -> Option<&ClientError> {
        match self {
            AppError::Client(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
