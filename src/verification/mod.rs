//! Host-facing validation surfaces built on the shared [`outcome`] policy.

pub mod field;
pub mod outcome;
pub mod validator;

pub use field::{EmailField, ErrorDetail, FieldError};
pub use outcome::{classify, Outcome, Policy, Rejection, RejectionKind};
pub use validator::{EmailValidator, ValidationError, ValidatorError};

use crate::core::context::Context;
use std::time::Instant;

/// Validates `email` through a fresh caching client and classifies the result.
///
/// The client is closed before returning, whatever the outcome.
pub(crate) async fn check(ctx: &Context, email: &str, policy: &Policy) -> Outcome {
    let start_time = Instant::now();

    let mut client = ctx.cached_client();
    let result = client.validate(email).await;
    client.close().await;

    let outcome = classify(email, result, policy);
    let duration = start_time.elapsed();
    match &outcome {
        Outcome::Accepted => {
            tracing::debug!(target: "truelist::verification", "{} accepted in {:.2?}", email, duration);
        }
        Outcome::Rejected(r) => {
            tracing::debug!(target: "truelist::verification", "{} rejected ({}) in {:.2?}", email, r.code, duration);
        }
        Outcome::Propagated(e) => {
            tracing::error!(target: "truelist::verification", "Validation of {} failed in {:.2?}: {}", email, duration, e);
        }
    }
    outcome
}
