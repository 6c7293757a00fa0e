//! Model-level validator: rejections carry a code and a message.

use super::outcome::{Outcome, Policy, RejectionKind};
use crate::core::config::Config;
use crate::core::context::Context;
use crate::core::error::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected value, identified by a stable `code`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub code: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Propagated(#[from] AppError),
}

impl ValidatorError {
    pub fn code(&self) -> Option<&str> {
        match self {
            ValidatorError::Invalid(e) => Some(e.code.as_str()),
            ValidatorError::Propagated(_) => None,
        }
    }
}

/// Checks deliverability of an address before it is stored.
///
/// Its options serialize with serde so a validator can be persisted alongside
/// the model definition and rebuilt identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailValidator {
    allow_risky: bool,
    fail_silently: bool,
    message: String,
    code: String,
}

impl EmailValidator {
    pub const DEFAULT_MESSAGE: &'static str =
        "This email address could not be verified as deliverable.";
    pub const DEFAULT_CODE: &'static str = "invalid_email";

    /// A validator taking risk tolerance from `config` and failing silently.
    pub fn new(config: &Config) -> Self {
        Self {
            allow_risky: config.allow_risky,
            fail_silently: true,
            message: Self::DEFAULT_MESSAGE.to_string(),
            code: Self::DEFAULT_CODE.to_string(),
        }
    }

    pub fn allow_risky(mut self, allow: bool) -> Self {
        self.allow_risky = allow;
        self
    }

    pub fn fail_silently(mut self, fail_silently: bool) -> Self {
        self.fail_silently = fail_silently;
        self
    }

    /// Message used when the address is not deliverable.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Code used when the address is not deliverable.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn policy(&self) -> Policy {
        Policy {
            allow_risky: self.allow_risky,
            fail_silently: self.fail_silently,
        }
    }

    pub async fn validate(&self, ctx: &Context, value: &str) -> Result<(), ValidatorError> {
        match super::check(ctx, value, &self.policy()).await {
            Outcome::Accepted => Ok(()),
            Outcome::Rejected(r) if r.kind == RejectionKind::Undeliverable => {
                Err(ValidationError {
                    code: self.code.clone(),
                    message: self.message.clone(),
                }
                .into())
            }
            Outcome::Rejected(r) => Err(ValidationError {
                code: r.code,
                message: r.message,
            }
            .into()),
            Outcome::Propagated(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_config() {
        let config = Config {
            allow_risky: false,
            ..Config::default()
        };
        let validator = EmailValidator::new(&config);
        assert_eq!(
            validator.policy(),
            Policy {
                allow_risky: false,
                fail_silently: true,
            }
        );
    }

    #[test]
    fn equality_compares_options() {
        let config = Config::default();
        let v1 = EmailValidator::new(&config).allow_risky(true);
        let v2 = EmailValidator::new(&config).allow_risky(true);
        let v3 = EmailValidator::new(&config).allow_risky(false);
        assert_eq!(v1, v2);
        assert_ne!(v1, v3);
        assert_ne!(v1, v2.clone().code("bad_email"));
    }

    #[test]
    fn options_serialize_by_name() {
        let validator = EmailValidator::new(&Config::default())
            .allow_risky(false)
            .fail_silently(false);
        let value = serde_json::to_value(&validator).unwrap();
        assert_eq!(value["allow_risky"], false);
        assert_eq!(value["fail_silently"], false);
        assert_eq!(value["code"], "invalid_email");

        let rebuilt: EmailValidator = serde_json::from_value(value).unwrap();
        assert_eq!(rebuilt, validator);
    }
}
