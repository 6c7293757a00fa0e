//! Data types shared across the crate: the validation result and its state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deliverability state reported by the Truelist API.
///
/// Unrecognised states are kept verbatim in [`EmailState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmailState {
    Valid,
    Invalid,
    Risky,
    Unknown,
    Other(String),
}

impl EmailState {
    pub fn as_str(&self) -> &str {
        match self {
            EmailState::Valid => "valid",
            EmailState::Invalid => "invalid",
            EmailState::Risky => "risky",
            EmailState::Unknown => "unknown",
            EmailState::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for EmailState {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ok" | "valid" => EmailState::Valid,
            "email_invalid" | "invalid" => EmailState::Invalid,
            "risky" => EmailState::Risky,
            "unknown" => EmailState::Unknown,
            _ => EmailState::Other(raw),
        }
    }
}

impl From<&str> for EmailState {
    fn from(raw: &str) -> Self {
        EmailState::from(raw.to_string())
    }
}

impl From<EmailState> for String {
    fn from(state: EmailState) -> Self {
        match state {
            EmailState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating a single address.
///
/// The serde field names double as the cache entry format; the aliases accept
/// the field names used by the API response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(alias = "address")]
    pub email: String,
    pub domain: String,
    pub canonical: String,
    #[serde(default)]
    pub mx_record: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(alias = "email_state")]
    pub state: EmailState,
    #[serde(alias = "email_sub_state", default)]
    pub sub_state: String,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(alias = "did_you_mean", default)]
    pub suggestion: Option<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.state == EmailState::Valid
    }

    pub fn is_invalid(&self) -> bool {
        self.state == EmailState::Invalid
    }

    pub fn is_risky(&self) -> bool {
        self.state == EmailState::Risky
    }

    pub fn is_unknown(&self) -> bool {
        self.state == EmailState::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_state_names_map_to_states() {
        assert_eq!(EmailState::from("ok"), EmailState::Valid);
        assert_eq!(EmailState::from("email_invalid"), EmailState::Invalid);
        assert_eq!(EmailState::from("risky"), EmailState::Risky);
        assert_eq!(EmailState::from("unknown"), EmailState::Unknown);
        assert_eq!(
            EmailState::from("accept_all"),
            EmailState::Other("accept_all".to_string())
        );
    }

    #[test]
    fn deserializes_api_field_names() {
        let body = r#"{
            "address": "user@example.com",
            "domain": "example.com",
            "canonical": "user",
            "mx_record": null,
            "first_name": null,
            "last_name": null,
            "email_state": "ok",
            "email_sub_state": "email_ok",
            "verified_at": "2026-01-01T00:00:00Z",
            "did_you_mean": null
        }"#;

        let result: ValidationResult = serde_json::from_str(body).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.email, "user@example.com");
        assert_eq!(result.sub_state, "email_ok");
        assert_eq!(result.verified_at.as_deref(), Some("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn serializes_normalized_state() {
        let result = ValidationResult {
            email: "bad@example.com".to_string(),
            domain: "example.com".to_string(),
            canonical: "bad".to_string(),
            mx_record: None,
            first_name: None,
            last_name: None,
            state: EmailState::from("email_invalid"),
            sub_state: "failed_no_mailbox".to_string(),
            verified_at: None,
            suggestion: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["state"], "invalid");
        assert_eq!(value["email"], "bad@example.com");
    }
}
