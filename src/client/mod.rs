//! Validation client abstraction.
//!
//! A [`Connector`] creates clients on demand; a [`ValidationClient`] performs
//! single-address validations until it is closed.

pub mod http;

pub use http::{HttpClient, HttpConnector};

use crate::core::config::Config;
use crate::core::error::{ClientError, Result};
use crate::core::models::ValidationResult;
use async_trait::async_trait;

/// A live connection to the validation service.
#[async_trait]
pub trait ValidationClient: Send + Sync {
    /// Validates one address. No retries are performed.
    async fn validate(&self, email: &str) -> std::result::Result<ValidationResult, ClientError>;

    /// Releases the underlying connection.
    async fn close(&mut self);
}

/// Factory for [`ValidationClient`]s.
pub trait Connector: Send + Sync {
    fn connect(&self, config: &Config) -> Result<Box<dyn ValidationClient>>;
}
