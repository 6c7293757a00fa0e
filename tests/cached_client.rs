//! Integration tests for the caching validation client.

mod support;

use std::sync::Arc;
use std::time::Duration;
use support::{
    cached_config, context, invalid_result, risky_result, test_config, unknown_result,
    valid_result, Reply,
};
use truelist_guard::{
    cache_key, AppError, CacheBackend, CacheRegistry, ClientError, EmailState, MemoryCache,
};

#[tokio::test]
async fn caches_valid_result() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client();
    let first = client.validate("user@example.com").await.unwrap();
    let second = client.validate("user@example.com").await.unwrap();
    client.close().await;

    assert_eq!(first.state, EmailState::Valid);
    assert_eq!(second, first);
    assert_eq!(mock.validates(), 1);
}

#[tokio::test]
async fn cache_miss_calls_api_with_address() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client();
    let result = client.validate("user@example.com").await.unwrap();

    assert!(result.is_valid());
    assert_eq!(mock.validates(), 1);
    assert_eq!(mock.last_email().as_deref(), Some("user@example.com"));
}

#[tokio::test]
async fn cache_hit_ignores_case_and_whitespace() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client();
    client.validate("user@example.com").await.unwrap();
    client.validate("  User@Example.com ").await.unwrap();

    assert_eq!(mock.validates(), 1);
}

#[tokio::test]
async fn does_not_cache_unknown_results() {
    let (ctx, mock) = context(cached_config(), Reply::Result(unknown_result()));

    let mut client = ctx.cached_client();
    client.validate("mystery@example.com").await.unwrap();
    client.validate("mystery@example.com").await.unwrap();

    assert_eq!(mock.validates(), 2);
    let backend = ctx.caches().get("default").unwrap();
    assert_eq!(backend.get(&cache_key("mystery@example.com")), None);
}

#[tokio::test]
async fn caches_invalid_and_risky_results() {
    for (email, fixture) in [
        ("bad@example.com", invalid_result()),
        ("risky@example.com", risky_result()),
    ] {
        let expected = fixture.state.clone();
        let (ctx, mock) = context(cached_config(), Reply::Result(fixture));

        let mut client = ctx.cached_client();
        let first = client.validate(email).await.unwrap();
        let second = client.validate(email).await.unwrap();

        assert_eq!(first.state, expected);
        assert_eq!(second.state, expected);
        assert_eq!(mock.validates(), 1);
    }
}

#[tokio::test]
async fn skips_cache_when_disabled() {
    let (ctx, mock) = context(test_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client();
    assert!(!client.cache_enabled());
    client.validate("user@example.com").await.unwrap();
    client.validate("user@example.com").await.unwrap();

    assert_eq!(mock.validates(), 2);
}

#[tokio::test]
async fn per_client_override_disables_cache() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client().with_cache_enabled(false);
    client.validate("user@example.com").await.unwrap();
    client.validate("user@example.com").await.unwrap();

    assert_eq!(mock.validates(), 2);
}

#[tokio::test]
async fn cache_hit_is_shared_between_clients() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut first = ctx.cached_client();
    first.validate("user@example.com").await.unwrap();
    first.close().await;

    let mut second = ctx.cached_client();
    second.validate("user@example.com").await.unwrap();
    second.close().await;

    assert_eq!(mock.validates(), 1);
    // The second client never needed a connection.
    assert_eq!(mock.connects(), 1);
}

#[tokio::test]
async fn expired_entry_triggers_new_call() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client().with_cache_ttl(Duration::ZERO);
    client.validate("user@example.com").await.unwrap();
    client.validate("user@example.com").await.unwrap();

    assert_eq!(mock.validates(), 2);
}

#[tokio::test]
async fn huge_ttl_is_stored_without_overflow() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client().with_cache_ttl(Duration::from_secs(u64::MAX));
    client.validate("user@example.com").await.unwrap();
    client.validate("user@example.com").await.unwrap();

    assert_eq!(mock.validates(), 1);
}

#[tokio::test]
async fn unreadable_entry_is_treated_as_miss() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));
    let backend = ctx.caches().get("default").unwrap();
    let key = cache_key("user@example.com");
    backend.set(&key, "{not json".to_string(), Duration::from_secs(60));

    let mut client = ctx.cached_client();
    let result = client.validate("user@example.com").await.unwrap();

    assert!(result.is_valid());
    assert_eq!(mock.validates(), 1);
    assert!(backend.get(&key).is_some_and(|raw| raw.starts_with('{') && raw.contains("valid")));
}

#[tokio::test]
async fn uses_backend_selected_by_alias() {
    let shared = Arc::new(MemoryCache::new());
    let mut registry = CacheRegistry::new();
    registry.insert("shared", shared.clone());

    let (ctx, _mock) = context(cached_config(), Reply::Result(valid_result()));
    let ctx = ctx.with_caches(registry);

    let mut client = ctx.cached_client().with_cache_alias("shared");
    client.validate("user@example.com").await.unwrap();

    assert_eq!(shared.len(), 1);
}

#[tokio::test]
async fn unknown_alias_is_a_config_error() {
    let (ctx, mock) = context(cached_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client().with_cache_alias("redis");
    let err = client.validate("user@example.com").await.unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    assert_eq!(mock.validates(), 0);
}

#[tokio::test]
async fn client_errors_are_returned_untouched() {
    let (ctx, _mock) = context(
        cached_config(),
        Reply::Error(ClientError::Connection("timeout".to_string())),
    );

    let mut client = ctx.cached_client();
    let err = client.validate("user@example.com").await.unwrap_err();

    assert_eq!(
        err.as_client_error(),
        Some(&ClientError::Connection("timeout".to_string()))
    );
}

#[tokio::test]
async fn close_releases_underlying_client_once() {
    let (ctx, mock) = context(test_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client();
    client.validate("user@example.com").await.unwrap();
    assert!(client.is_connected());

    client.close().await;
    client.close().await;

    assert!(!client.is_connected());
    assert_eq!(mock.closes(), 1);
}

#[tokio::test]
async fn close_without_client_is_noop() {
    let (ctx, mock) = context(test_config(), Reply::Result(valid_result()));

    let mut client = ctx.cached_client();
    client.close().await;

    assert_eq!(mock.connects(), 0);
    assert_eq!(mock.closes(), 0);
}
