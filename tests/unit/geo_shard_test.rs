//! Unit tests for the geo-shard resolver against a mock IP-echo service.

use std::time::Duration;

use portal_browser::services::geo_shard::GeoShardResolver;
use portal_browser::services::input_resolver::resolve;
use portal_browser::types::errors::GeoShardError;
use portal_browser::types::settings::{GeoShardSettings, SearchEngine};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver_for(server: &MockServer, timeout_ms: u64) -> GeoShardResolver {
    GeoShardResolver::new(GeoShardSettings {
        lookup_url: format!("{}/ip", server.uri()),
        timeout_ms,
        ..GeoShardSettings::default()
    })
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_success() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"ip": "73.12.1.9"}))).await;

    let geo = resolver_for(&server, 3000);
    assert_eq!(geo.lookup_first_octet().await.unwrap(), "73");
    assert_eq!(
        geo.rewrite("nowgg.fun/apps/roblox").await.as_deref(),
        Some("https://73.ip.nowgg.fun/")
    );
}

#[tokio::test]
async fn test_rewrite_ignores_other_domains() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"ip": "73.12.1.9"}))).await;

    let geo = resolver_for(&server, 3000);
    assert_eq!(geo.rewrite("example.com").await, None);
    assert_eq!(geo.matching_domain("NOWGG.LOL"), Some("nowgg.lol"));
}

#[tokio::test]
async fn test_lookup_missing_ip_field() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"address": "1.2.3.4"}))).await;

    let geo = resolver_for(&server, 3000);
    assert!(matches!(geo.lookup_first_octet().await, Err(GeoShardError::NotIpv4(_))));
    assert_eq!(geo.rewrite("nowgg.lol").await, None);
}

#[tokio::test]
async fn test_lookup_malformed_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let geo = resolver_for(&server, 3000);
    assert!(matches!(
        geo.lookup_first_octet().await,
        Err(GeoShardError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_lookup_ipv6_answer() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"ip": "2001:db8::1"}))).await;

    let geo = resolver_for(&server, 3000);
    assert!(matches!(geo.lookup_first_octet().await, Err(GeoShardError::NotIpv4(_))));
}

#[tokio::test]
async fn test_lookup_server_error() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let geo = resolver_for(&server, 3000);
    assert!(matches!(geo.lookup_first_octet().await, Err(GeoShardError::Network(_))));
}

#[tokio::test]
async fn test_lookup_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"ip": "73.12.1.9"}))
            .set_delay(Duration::from_millis(2000)),
    )
    .await;

    let geo = resolver_for(&server, 100);
    assert!(matches!(geo.lookup_first_octet().await, Err(GeoShardError::Timeout(100))));
    assert_eq!(geo.rewrite("nowgg.lol").await, None);
}

#[tokio::test]
async fn test_resolve_uses_shard() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"ip": "5.6.7.8"}))).await;

    let geo = resolver_for(&server, 3000);
    assert_eq!(
        resolve("  nowgg.lol  ", SearchEngine::Brave, &geo).await.as_deref(),
        Some("https://5.ip.nowgg.lol/")
    );
}

#[tokio::test]
async fn test_resolve_falls_back_when_lookup_fails() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(503)).await;

    let geo = resolver_for(&server, 3000);
    assert_eq!(
        resolve("nowgg.lol", SearchEngine::Brave, &geo).await.as_deref(),
        Some("https://nowgg.lol")
    );
}

#[tokio::test]
async fn test_shard_keeps_octet_as_written() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"ip": "01.2.3.4"}))).await;

    let geo = resolver_for(&server, 3000);
    assert_eq!(
        geo.rewrite("nowgg.lol").await.as_deref(),
        Some("https://01.ip.nowgg.lol/")
    );
}

#[tokio::test]
async fn test_padded_address_is_rejected() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"ip": " 73.12.1.9 "}))).await;

    let geo = resolver_for(&server, 3000);
    assert!(matches!(geo.lookup_first_octet().await, Err(GeoShardError::NotIpv4(_))));
}
