//! Serializer-level email field: rejections are reported against the field name.

use super::outcome::{Outcome, Policy};
use crate::core::config::Config;
use crate::core::context::Context;
use crate::core::error::AppError;
use email_address::EmailAddress;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

impl ErrorDetail {
    fn new(code: &str, message: &str) -> Self {
        Self {
            message: message.to_string(),
            code: code.to_string(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("{field}: {}", join_details(.details))]
    Invalid {
        field: String,
        details: Vec<ErrorDetail>,
    },

    #[error(transparent)]
    Propagated(#[from] AppError),
}

impl FieldError {
    pub fn details(&self) -> &[ErrorDetail] {
        match self {
            FieldError::Invalid { details, .. } => details.as_slice(),
            FieldError::Propagated(_) => &[],
        }
    }

    /// Code of the first error detail, if any.
    pub fn code(&self) -> Option<&str> {
        self.details().first().map(|d| d.code.as_str())
    }
}

fn join_details(details: &[ErrorDetail]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An email input field that also checks deliverability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailField {
    name: String,
    allow_risky: bool,
    fail_silently: bool,
    required: bool,
    allow_blank: bool,
}

impl EmailField {
    pub fn new(name: impl Into<String>, config: &Config) -> Self {
        Self {
            name: name.into(),
            allow_risky: config.allow_risky,
            fail_silently: true,
            required: true,
            allow_blank: false,
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

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = allow;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> Policy {
        Policy {
            allow_risky: self.allow_risky,
            fail_silently: self.fail_silently,
        }
    }

    /// Cleans `data` and checks its deliverability, returning the cleaned value.
    ///
    /// Missing, blank and malformed values are rejected before any remote call.
    pub async fn run_validation(
        &self,
        ctx: &Context,
        data: Option<&str>,
    ) -> Result<Option<String>, FieldError> {
        let Some(raw) = data else {
            if self.required {
                return Err(self.invalid("required", "This field is required."));
            }
            return Ok(None);
        };

        let value = raw.trim();
        if value.is_empty() {
            if self.allow_blank {
                return Ok(Some(String::new()));
            }
            return Err(self.invalid("blank", "This field may not be blank."));
        }

        if !EmailAddress::is_valid(value) {
            return Err(self.invalid("invalid", "Enter a valid email address."));
        }

        match super::check(ctx, value, &self.policy()).await {
            Outcome::Accepted => Ok(Some(value.to_string())),
            Outcome::Rejected(r) => Err(self.invalid(&r.code, &r.message)),
            Outcome::Propagated(e) => Err(e.into()),
        }
    }

    fn invalid(&self, code: &str, message: &str) -> FieldError {
        FieldError::Invalid {
            field: self.name.clone(),
            details: vec![ErrorDetail::new(code, message)],
        }
    }
}
