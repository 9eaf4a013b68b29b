use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top-level portal settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PortalSettings {
    pub general: GeneralSettings,
    pub proxy: ProxySettings,
    pub search: SearchSettings,
    pub geo_shard: GeoShardSettings,
}

/// General portal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub theme: String,
    pub game_store: String,
    pub new_tab_page: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            game_store: "default".to_string(),
            new_tab_page: "/newtab.html".to_string(),
        }
    }
}

/// Which reverse-proxy runtime encodes navigations.
///
/// Serialized lowercase; parsing ignores case so values written as
/// `"Ultraviolet"` by older front-ends still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProxyBackend {
    #[default]
    Scramjet,
    Ultraviolet,
}

impl ProxyBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyBackend::Scramjet => "scramjet",
            ProxyBackend::Ultraviolet => "ultraviolet",
        }
    }
}

impl fmt::Display for ProxyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scramjet" => Ok(ProxyBackend::Scramjet),
            "ultraviolet" | "uv" => Ok(ProxyBackend::Ultraviolet),
            other => Err(format!("unknown proxy backend '{}'", other)),
        }
    }
}

impl Serialize for ProxyBackend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProxyBackend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Proxy runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProxySettings {
    pub backend: ProxyBackend,
    pub ultraviolet_prefix: String,
    pub scramjet_prefix: String,
    /// Signaling server the proxy transport connects through.
    pub wisp_url: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            backend: ProxyBackend::Scramjet,
            ultraviolet_prefix: "/uv/service/".to_string(),
            scramjet_prefix: "/scramjet/".to_string(),
            wisp_url: "ws://127.0.0.1:8080/wisp/".to_string(),
        }
    }
}

/// Search engine used when address-bar input is not a URL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Brave,
    DuckDuckGo,
    Bing,
    Google,
    Startpage,
    Qwant,
}

impl SearchEngine {
    /// Query URL prefix; the percent-encoded query is appended directly.
    pub fn query_prefix(&self) -> &'static str {
        match self {
            SearchEngine::Brave => "https://search.brave.com/search?q=",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/search?q=",
            SearchEngine::Bing => "https://bing.com/search?q=",
            SearchEngine::Google => "https://google.com/search?q=",
            SearchEngine::Startpage => "https://startpage.com/search?q=",
            SearchEngine::Qwant => "https://qwant.com/search?q=",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchSettings {
    pub engine: SearchEngine,
}

/// Public-IP based shard routing for a fixed family of game-hosting domains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoShardSettings {
    pub enabled: bool,
    pub lookup_url: String,
    pub timeout_ms: u64,
    pub domains: Vec<String>,
}

impl Default for GeoShardSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lookup_url: "https://api.ipify.org?format=json".to_string(),
            timeout_ms: 3000,
            domains: vec!["nowgg.lol".to_string(), "nowgg.fun".to_string()],
        }
    }
}
