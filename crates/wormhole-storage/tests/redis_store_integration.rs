use std::time::Duration;

use redis::AsyncCommands;
use wormhole_core::{generate, ShortCode, UrlStore};
use wormhole_storage::{RedisStoreSettings, RedisUrlStore};
use wormhole_test_infra::redis::{RedisConfig, RedisServer};

struct Fixture {
    redis: RedisServer,
    store: RedisUrlStore,
}

impl Fixture {
    async fn start() -> Self {
        Self::start_with_prefix("").await
    }

    async fn start_with_prefix(prefix: &str) -> Self {
        let redis = RedisServer::start(RedisConfig::default())
            .await
            .expect("start redis");
        let settings = RedisStoreSettings::builder()
            .url(redis.url())
            .key_prefix(prefix)
            .timeout(Duration::from_secs(1))
            .build();
        let store = RedisUrlStore::new(settings).expect("redis url");
        Self { redis, store }
    }
}

fn code(s: &str) -> ShortCode {
    ShortCode::parse(s).unwrap()
}

#[tokio::test]
async fn put_then_get() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .put(&code("R9TVn"), "example.com")
        .await
        .unwrap();

    let url = fixture.store.get(&code("R9TVn")).await.unwrap();
    assert_eq!(url.as_deref(), Some("example.com"));
}

#[tokio::test]
async fn missing_key_is_none() {
    let fixture = Fixture::start().await;

    let url = fixture.store.get(&code("zzzzz")).await.unwrap();
    assert!(url.is_none());
}

#[tokio::test]
async fn mapping_is_stored_under_bare_code_without_expiry() {
    let fixture = Fixture::start().await;
    let c = generate("https://example.com");

    fixture.store.put(&c, "https://example.com").await.unwrap();

    let mut conn = fixture.redis.connection().await.unwrap();
    let raw: Option<String> = conn.get(c.as_str()).await.unwrap();
    assert_eq!(raw.as_deref(), Some("https://example.com"));

    let ttl: i64 = conn.ttl(c.as_str()).await.unwrap();
    assert_eq!(ttl, -1, "mapping must not expire");
}

#[tokio::test]
async fn key_prefix_is_applied() {
    let fixture = Fixture::start_with_prefix("wh:url:").await;

    fixture
        .store
        .put(&code("abc12"), "https://example.com")
        .await
        .unwrap();

    let mut conn = fixture.redis.connection().await.unwrap();
    let raw: Option<String> = conn.get("wh:url:abc12").await.unwrap();
    assert_eq!(raw.as_deref(), Some("https://example.com"));
    let bare: Option<String> = conn.get("abc12").await.unwrap();
    assert!(bare.is_none());
}

#[tokio::test]
async fn later_write_overwrites() {
    let fixture = Fixture::start().await;

    fixture.store.put(&code("abc12"), "https://a.com").await.unwrap();
    fixture.store.put(&code("abc12"), "https://b.com").await.unwrap();

    let url = fixture.store.get(&code("abc12")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://b.com"));
}

#[tokio::test]
async fn ping_succeeds_against_live_server() {
    let fixture = Fixture::start().await;
    fixture.store.ping().await.unwrap();
}

#[tokio::test]
async fn outage_surfaces_as_error_not_missing_key() {
    let fixture = Fixture::start().await;
    fixture.redis.stop().await.unwrap();

    let put = fixture.store.put(&code("abc12"), "https://example.com").await;
    assert!(put.is_err(), "write to a dead store must fail");

    let get = fixture.store.get(&code("abc12")).await;
    assert!(
        get.is_err(),
        "a dead store must not read as a missing key: {get:?}"
    );
}
