//! reqwest-backed client for the Truelist HTTP API.

use super::{Connector, ValidationClient};
use crate::core::config::Config;
use crate::core::error::{AppError, ClientError, Result};
use crate::core::models::ValidationResult;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const VERIFY_PATH: &str = "api/v1/verify_inline";

/// Creates [`HttpClient`]s from the runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, config: &Config) -> Result<Box<dyn ValidationClient>> {
        Ok(Box::new(HttpClient::new(config)?))
    }
}

/// Client for the `verify_inline` endpoint.
#[derive(Debug)]
pub struct HttpClient {
    http: Option<reqwest::Client>,
    endpoint: Url,
    api_key: String,
}

impl HttpClient {
    /// Builds a client. Fails with an authentication error when no API key is
    /// configured, since every request would be rejected.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => {
                return Err(ClientError::Authentication {
                    message: "TRUELIST_API_KEY is not configured".to_string(),
                    status: None,
                }
                .into())
            }
        };

        let endpoint = verify_endpoint(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("truelist-guard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(target: "truelist::client", "HTTP client ready for {}", endpoint);

        Ok(Self {
            http: Some(http),
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ValidationClient for HttpClient {
    async fn validate(&self, email: &str) -> std::result::Result<ValidationResult, ClientError> {
        let http = self
            .http
            .as_ref()
            .ok_or_else(|| ClientError::Connection("client has been closed".to_string()))?;

        let response = http
            .post(self.endpoint.clone())
            .query(&[("email", email)])
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, &body)
    }

    async fn close(&mut self) {
        if self.http.take().is_some() {
            tracing::debug!(target: "truelist::client", "HTTP client closed");
        }
    }
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    emails: Vec<ValidationResult>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: Option<String>,
}

fn verify_endpoint(base_url: &str) -> Result<Url> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Ok(Url::parse(&base)?.join(VERIFY_PATH)?)
}

/// Maps an HTTP status and body onto a result or a client error.
pub(crate) fn parse_response(
    status: u16,
    body: &str,
) -> std::result::Result<ValidationResult, ClientError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(match status {
            401 | 403 => ClientError::Authentication {
                message,
                status: Some(status),
            },
            _ => ClientError::Api {
                status: Some(status),
                message,
            },
        });
    }

    let parsed: VerifyResponse = serde_json::from_str(body).map_err(|e| ClientError::Api {
        status: Some(status),
        message: format!("Malformed response body: {}", e),
    })?;

    parsed.emails.into_iter().next().ok_or(ClientError::Api {
        status: Some(status),
        message: "Response contained no validation result".to_string(),
    })
}
