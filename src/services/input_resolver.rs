//! Address-bar input resolution: trimming, URL-vs-search disambiguation and
//! the optional geo-shard rewrite.

use crate::services::geo_shard::GeoShardResolver;
use crate::services::proxy_codec::encode_uri_component;
use crate::types::settings::SearchEngine;

/// Trimmed input, or `None` when nothing is left.
pub fn normalize(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Input with no dot, or with a space, is a search query.
pub fn is_search_query(input: &str) -> bool {
    !input.contains('.') || input.contains(' ')
}

/// Turns already-trimmed input into a real destination URL.
pub fn to_destination(input: &str, engine: SearchEngine) -> String {
    if is_search_query(input) {
        format!("{}{}", engine.query_prefix(), encode_uri_component(input))
    } else if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Destination for input that has already been through [`normalize`].
pub async fn resolve_trimmed(trimmed: &str, engine: SearchEngine, geo: &GeoShardResolver) -> String {
    let rewritten = geo.rewrite(trimmed).await;
    let candidate = rewritten.as_deref().unwrap_or(trimmed);
    to_destination(candidate, engine)
}

/// Full resolution of raw address-bar input. `None` for blank input.
pub async fn resolve(
    input: &str,
    engine: SearchEngine,
    geo: &GeoShardResolver,
) -> Option<String> {
    let trimmed = normalize(input)?;
    Some(resolve_trimmed(trimmed, engine, geo).await)
}
