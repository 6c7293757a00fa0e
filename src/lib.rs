//! Email deliverability validation through the Truelist API.
//!
//! The crate resolves configuration, memoizes validation results in a pluggable
//! cache, and maps each result onto an accept / reject / propagate decision
//! exposed through a model-level [`EmailValidator`] and a serializer-level
//! [`EmailField`].

pub mod cache;
pub mod client;
pub mod core;
pub mod verification;

pub use crate::cache::{cache_key, CacheBackend, CacheRegistry, CachedClient, MemoryCache};
pub use crate::client::{Connector, HttpConnector, ValidationClient};
pub use crate::core::config::{Config, ConfigBuilder, Setting, SettingValue};
pub use crate::core::context::Context;
pub use crate::core::error::{AppError, ClientError, Result};
pub use crate::core::models::{EmailState, ValidationResult};
pub use crate::verification::{
    classify, EmailField, EmailValidator, FieldError, Outcome, Policy, Rejection, RejectionKind,
    ValidationError, ValidatorError,
};
