//! Mock validation client shared by the integration tests.
#![allow(dead_code)] // Test utility module - not all helpers used in every test

use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use truelist_guard::{
    ClientError, Config, Connector, Context, EmailState, Result, ValidationClient,
    ValidationResult,
};

/// What the mock client answers to every `validate` call.
#[derive(Debug, Clone)]
pub enum Reply {
    Result(ValidationResult),
    Error(ClientError),
}

#[derive(Debug, Default)]
pub struct Counters {
    pub connects: AtomicUsize,
    pub validates: AtomicUsize,
    pub closes: AtomicUsize,
}

/// Connector handing out clients that return a canned [`Reply`].
#[derive(Debug, Clone)]
pub struct MockConnector {
    reply: Reply,
    pub counters: Arc<Counters>,
    pub last_email: Arc<parking_lot::Mutex<Option<String>>>,
}

impl MockConnector {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            counters: Arc::default(),
            last_email: Arc::default(),
        }
    }

    pub fn connects(&self) -> usize {
        self.counters.connects.load(Ordering::SeqCst)
    }

    pub fn validates(&self) -> usize {
        self.counters.validates.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    pub fn last_email(&self) -> Option<String> {
        self.last_email.lock().clone()
    }
}

impl Connector for MockConnector {
    fn connect(&self, _config: &Config) -> Result<Box<dyn ValidationClient>> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockClient {
            connector: self.clone(),
        }))
    }
}

struct MockClient {
    connector: MockConnector,
}

#[async_trait]
impl ValidationClient for MockClient {
    async fn validate(&self, email: &str) -> std::result::Result<ValidationResult, ClientError> {
        self.connector
            .counters
            .validates
            .fetch_add(1, Ordering::SeqCst);
        *self.connector.last_email.lock() = Some(email.to_string());
        match &self.connector.reply {
            Reply::Result(r) => Ok(r.clone()),
            Reply::Error(e) => Err(e.clone()),
        }
    }

    async fn close(&mut self) {
        self.connector.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn result(email: &str, state: &str, sub_state: &str) -> ValidationResult {
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    ValidationResult {
        email: email.to_string(),
        domain: domain.to_string(),
        canonical: local.to_string(),
        mx_record: None,
        first_name: None,
        last_name: None,
        state: EmailState::from(state),
        sub_state: sub_state.to_string(),
        verified_at: None,
        suggestion: None,
    }
}

pub fn valid_result() -> ValidationResult {
    result("user@example.com", "ok", "email_ok")
}

pub fn invalid_result() -> ValidationResult {
    result("bad@example.com", "email_invalid", "failed_no_mailbox")
}

pub fn risky_result() -> ValidationResult {
    result("risky@example.com", "risky", "accept_all")
}

pub fn unknown_result() -> ValidationResult {
    result("mystery@example.com", "unknown", "unknown")
}

pub fn connection_error() -> ClientError {
    ClientError::Connection("timeout".to_string())
}

pub fn auth_error() -> ClientError {
    ClientError::Authentication {
        message: "Invalid API key".to_string(),
        status: Some(401),
    }
}

/// A context wired to a fresh mock connector.
pub fn context(config: Config, reply: Reply) -> (Context, MockConnector) {
    let connector = MockConnector::new(reply);
    let ctx = Context::new(config).with_connector(Arc::new(connector.clone()));
    (ctx, connector)
}

pub fn test_config() -> Config {
    Config {
        api_key: Some("test-api-key".to_string()),
        ..Config::default()
    }
}

pub fn cached_config() -> Config {
    Config {
        cache_enabled: true,
        ..test_config()
    }
}
