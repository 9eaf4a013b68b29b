//! Geo-shard rewrite.
//!
//! A few game-hosting domains serve each region from a subdomain keyed by the
//! first octet of the client's public IPv4 address. The lookup is a best-effort
//! enhancement: every failure falls back to the unrewritten input.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::types::errors::GeoShardError;
use crate::types::settings::GeoShardSettings;

/// Dotted quad, 0-255 per part. Two-digit parts may carry a leading zero
/// (`01`), three-digit ones may not.
static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])){3}$").unwrap()
});

#[derive(Debug, Deserialize)]
struct IpEcho {
    #[serde(default)]
    ip: Option<String>,
}

/// Resolves shard subdomains through a public IP-echo service.
pub struct GeoShardResolver {
    client: reqwest::Client,
    settings: GeoShardSettings,
}

impl GeoShardResolver {
    pub fn new(settings: GeoShardSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &GeoShardSettings {
        &self.settings
    }

    /// The configured domain mentioned in `input`, compared case-insensitively.
    pub fn matching_domain(&self, input: &str) -> Option<&str> {
        if !self.settings.enabled {
            return None;
        }
        let lower = input.to_lowercase();
        self.settings
            .domains
            .iter()
            .find(|d| lower.contains(&d.to_lowercase()))
            .map(String::as_str)
    }

    /// Shard URL for `domain` given the first octet of the public address.
    pub fn shard_url(domain: &str, first_octet: &str) -> String {
        format!("https://{}.ip.{}/", first_octet, domain.to_lowercase())
    }

    /// First part of a dotted-quad address, exactly as the echo service wrote
    /// it. The address is not trimmed; surrounding whitespace makes it invalid.
    pub fn first_octet(ip: &str) -> Result<&str, GeoShardError> {
        if !DOTTED_QUAD.is_match(ip) {
            return Err(GeoShardError::NotIpv4(ip.to_string()));
        }
        Ok(ip.split('.').next().unwrap_or(ip))
    }

    /// Asks the IP-echo service for the public address, bounded by the timeout.
    pub async fn lookup_first_octet(&self) -> Result<String, GeoShardError> {
        let timeout_ms = self.settings.timeout_ms;
        let ip = tokio::time::timeout(Duration::from_millis(timeout_ms), self.fetch_ip())
            .await
            .map_err(|_| GeoShardError::Timeout(timeout_ms))??;
        Self::first_octet(&ip).map(str::to_string)
    }

    async fn fetch_ip(&self) -> Result<String, GeoShardError> {
        let response = self
            .client
            .get(&self.settings.lookup_url)
            .send()
            .await
            .map_err(|e| GeoShardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoShardError::Network(format!(
                "IP lookup failed with status {}",
                response.status()
            )));
        }

        let body: IpEcho = response
            .json()
            .await
            .map_err(|e| GeoShardError::InvalidResponse(e.to_string()))?;
        Ok(body.ip.unwrap_or_default())
    }

    /// Shard URL for `input` when it names a sharded domain and the lookup
    /// succeeds; `None` otherwise.
    pub async fn rewrite(&self, input: &str) -> Option<String> {
        let domain = self.matching_domain(input)?.to_string();
        match self.lookup_first_octet().await {
            Ok(octet) => {
                let url = Self::shard_url(&domain, &octet);
                log::info!("[GEO] {} -> {}", input, url);
                Some(url)
            }
            Err(e) => {
                log::warn!("[GEO] Unable to resolve shard for {}: {}", domain, e);
                None
            }
        }
    }
}
