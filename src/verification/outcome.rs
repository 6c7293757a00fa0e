//! Decision policy shared by every validation surface.
//!
//! [`classify`] turns the result of a (possibly cached) validation call into an
//! [`Outcome`]. Authentication failures always propagate; every other failure
//! class is accepted or rejected depending on the [`Policy`].

use crate::core::error::{AppError, Result};
use crate::core::models::{EmailState, ValidationResult};
use serde::{Deserialize, Serialize};

/// The two tolerance switches applied to a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Accept addresses reported as `risky`.
    pub allow_risky: bool,
    /// Accept addresses when the service fails or answers `unknown`.
    pub fail_silently: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allow_risky: true,
            fail_silently: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Definitively invalid, or risky without risk tolerance.
    Undeliverable,
    /// Connection or API failure.
    ServiceUnavailable,
    /// The service answered `unknown`.
    Inconclusive,
}

impl RejectionKind {
    pub fn code(self) -> &'static str {
        match self {
            RejectionKind::Undeliverable => "invalid_email",
            RejectionKind::ServiceUnavailable => "service_unavailable",
            RejectionKind::Inconclusive => "unknown_email",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            RejectionKind::Undeliverable => {
                "This email address could not be verified as deliverable."
            }
            RejectionKind::ServiceUnavailable => {
                "Email validation service is temporarily unavailable."
            }
            RejectionKind::Inconclusive => "Email validation returned an inconclusive result.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub code: String,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: RejectionKind) -> Self {
        Self {
            kind,
            code: kind.code().to_string(),
            message: kind.default_message().to_string(),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Accepted,
    Rejected(Rejection),
    /// An error that must reach the caller unchanged.
    Propagated(AppError),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

/// Decides what to do with the result of validating `email`.
pub fn classify(email: &str, result: Result<ValidationResult>, policy: &Policy) -> Outcome {
    let result = match result {
        Ok(result) => result,
        Err(AppError::Client(err)) if !err.is_authentication() => {
            tracing::warn!(
                target: "truelist::verification",
                "Truelist API error while validating {}: {}",
                email,
                err
            );
            return if policy.fail_silently {
                Outcome::Accepted
            } else {
                Outcome::Rejected(Rejection::new(RejectionKind::ServiceUnavailable))
            };
        }
        Err(err) => return Outcome::Propagated(err),
    };

    match &result.state {
        EmailState::Valid => Outcome::Accepted,
        EmailState::Risky if policy.allow_risky => Outcome::Accepted,
        EmailState::Unknown if policy.fail_silently => {
            tracing::warn!(
                target: "truelist::verification",
                "Accepting {} despite inconclusive result ({})",
                email,
                result.sub_state
            );
            Outcome::Accepted
        }
        EmailState::Unknown => Outcome::Rejected(Rejection::new(RejectionKind::Inconclusive)),
        EmailState::Other(state) => {
            tracing::debug!(
                target: "truelist::verification",
                "Treating unrecognised state '{}' for {} as undeliverable",
                state,
                email
            );
            Outcome::Rejected(Rejection::new(RejectionKind::Undeliverable))
        }
        EmailState::Invalid | EmailState::Risky => {
            Outcome::Rejected(Rejection::new(RejectionKind::Undeliverable))
        }
    }
}
