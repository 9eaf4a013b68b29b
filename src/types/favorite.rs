use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category a favorite belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Games,
    Apps,
    Movies,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Games => "games",
            FavoriteKind::Apps => "apps",
            FavoriteKind::Movies => "movies",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "games" => Ok(FavoriteKind::Games),
            "apps" => Ok(FavoriteKind::Apps),
            "movies" => Ok(FavoriteKind::Movies),
            other => Err(other.to_string()),
        }
    }
}

/// Item submitted by the UI for favoriting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A stored favorite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub kind: FavoriteKind,
    pub id: String,
    pub name: String,
    pub img: Option<String>,
    pub url: Option<String>,
    /// Milliseconds since the UNIX epoch.
    pub added_at: i64,
}

/// What happened on `add`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub added: bool,
    /// Oldest favorite dropped to stay under the limit.
    pub evicted: Option<Favorite>,
}
