use std::fmt;

use serde::{Deserialize, Serialize};

/// What the user is doing right now. Only non-idle time is counted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Games,
    Apps,
    Movies,
    Browsing,
    #[default]
    Idle,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::Games,
        Activity::Apps,
        Activity::Movies,
        Activity::Browsing,
        Activity::Idle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Games => "games",
            Activity::Apps => "apps",
            Activity::Movies => "movies",
            Activity::Browsing => "browsing",
            Activity::Idle => "idle",
        }
    }

    /// Case-sensitive; anything unrecognised is [`Activity::Idle`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .unwrap_or(Activity::Idle)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milliseconds spent per activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub games: i64,
    pub apps: i64,
    pub movies: i64,
    pub browsing: i64,
    pub idle: i64,
}

impl Breakdown {
    pub fn get(&self, activity: Activity) -> i64 {
        match activity {
            Activity::Games => self.games,
            Activity::Apps => self.apps,
            Activity::Movies => self.movies,
            Activity::Browsing => self.browsing,
            Activity::Idle => self.idle,
        }
    }

    pub fn set(&mut self, activity: Activity, ms: i64) {
        match activity {
            Activity::Games => self.games = ms,
            Activity::Apps => self.apps = ms,
            Activity::Movies => self.movies = ms,
            Activity::Browsing => self.browsing = ms,
            Activity::Idle => self.idle = ms,
        }
    }

    pub fn sum(&self) -> i64 {
        Activity::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

/// Everything the playtime panel shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaytimeStats {
    pub total_ms: i64,
    pub sessions: i64,
    /// `YYYY-MM-DD` (UTC) of the first recorded session.
    pub first_visit: String,
    pub breakdown: Breakdown,
}
