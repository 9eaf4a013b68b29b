//! Unit tests for address-bar input resolution.

use portal_browser::services::geo_shard::GeoShardResolver;
use portal_browser::services::input_resolver::{resolve, to_destination};
use portal_browser::types::settings::{GeoShardSettings, SearchEngine};
use rstest::rstest;

fn offline_geo() -> GeoShardResolver {
    GeoShardResolver::new(GeoShardSettings {
        enabled: false,
        ..GeoShardSettings::default()
    })
}

#[rstest]
#[case("hello world", "https://search.brave.com/search?q=hello%20world")]
#[case("example.com", "https://example.com")]
#[case("https://example.com/a", "https://example.com/a")]
#[case("http://plain.example", "http://plain.example")]
#[case("localhost", "https://search.brave.com/search?q=localhost")]
#[case("rust docs.rs", "https://search.brave.com/search?q=rust%20docs.rs")]
#[case("a&b=c?", "https://search.brave.com/search?q=a%26b%3Dc%3F")]
fn test_to_destination_brave(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(to_destination(input, SearchEngine::Brave), expected);
}

#[rstest]
#[case(SearchEngine::DuckDuckGo, "https://duckduckgo.com/search?q=cats")]
#[case(SearchEngine::Bing, "https://bing.com/search?q=cats")]
#[case(SearchEngine::Google, "https://google.com/search?q=cats")]
#[case(SearchEngine::Startpage, "https://startpage.com/search?q=cats")]
#[case(SearchEngine::Qwant, "https://qwant.com/search?q=cats")]
fn test_search_engine_prefixes(#[case] engine: SearchEngine, #[case] expected: &str) {
    assert_eq!(to_destination("cats", engine), expected);
}

#[tokio::test]
async fn test_resolve_trims_input() {
    let geo = offline_geo();
    assert_eq!(
        resolve("   example.com  ", SearchEngine::Brave, &geo).await.as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn test_resolve_blank_is_none() {
    let geo = offline_geo();
    assert_eq!(resolve("", SearchEngine::Brave, &geo).await, None);
    assert_eq!(resolve(" \t ", SearchEngine::Brave, &geo).await, None);
}

#[tokio::test]
async fn test_resolve_sharded_domain_without_geo_is_plain() {
    let geo = offline_geo();
    assert_eq!(
        resolve("nowgg.lol", SearchEngine::Brave, &geo).await.as_deref(),
        Some("https://nowgg.lol")
    );
}
