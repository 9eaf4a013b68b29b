use std::fmt;

use super::tab::TabId;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug, PartialEq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(TabId),
    /// The only remaining tab cannot be closed.
    LastTab,
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::LastTab => write!(f, "Cannot close last tab!"),
        }
    }
}

impl std::error::Error for TabError {}

// === CodecError ===

/// Errors from encoding or decoding proxied URLs.
#[derive(Debug, PartialEq)]
pub enum CodecError {
    /// The proxied source does not contain this codec's mount prefix.
    PrefixMismatch(String),
    /// The encoded segment is not valid percent-encoded UTF-8.
    Malformed(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::PrefixMismatch(src) => {
                write!(f, "Source is not under this proxy prefix: {}", src)
            }
            CodecError::Malformed(msg) => write!(f, "Malformed proxied URL: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

// === GeoShardError ===

/// Failures of the best-effort public IP lookup.
#[derive(Debug)]
pub enum GeoShardError {
    /// The HTTP request failed or returned a non-success status.
    Network(String),
    /// The lookup did not answer before the deadline.
    Timeout(u64),
    /// The response body could not be parsed.
    InvalidResponse(String),
    /// The reported address is not a dotted-quad IPv4 address.
    NotIpv4(String),
}

impl fmt::Display for GeoShardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoShardError::Network(msg) => write!(f, "IP lookup failed: {}", msg),
            GeoShardError::Timeout(ms) => write!(f, "IP lookup timed out after {}ms", ms),
            GeoShardError::InvalidResponse(msg) => {
                write!(f, "Unable to parse IP response: {}", msg)
            }
            GeoShardError::NotIpv4(ip) => write!(f, "Not an IPv4 address: {}", ip),
        }
    }
}

impl std::error::Error for GeoShardError {}

// === FrameError ===

/// Errors reported by the host while driving an embedded frame.
#[derive(Debug, PartialEq)]
pub enum FrameError {
    /// The frame's document belongs to another origin and cannot be read.
    CrossOrigin,
    /// The frame handle no longer refers to a live frame.
    Detached(u64),
    /// The host refused to load the given source.
    LoadFailed(String),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::CrossOrigin => write!(f, "Frame content is cross-origin"),
            FrameError::Detached(id) => write!(f, "Frame is detached: {}", id),
            FrameError::LoadFailed(msg) => write!(f, "Frame load failed: {}", msg),
        }
    }
}

impl std::error::Error for FrameError {}

// === NavigationError ===

/// Errors returned by the navigation controller.
#[derive(Debug, PartialEq)]
pub enum NavigationError {
    /// No tab is active, or the targeted tab disappeared.
    NoActiveTab,
    /// The tab has no frame attached.
    NoFrame(TabId),
    /// The host failed to load the proxied source.
    Frame(FrameError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::NoActiveTab => write!(f, "No active tab"),
            NavigationError::NoFrame(id) => write!(f, "Tab has no frame: {}", id),
            NavigationError::Frame(e) => write!(f, "Navigation frame error: {}", e),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::Frame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameError> for NavigationError {
    fn from(e: FrameError) -> Self {
        NavigationError::Frame(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === FavoriteError ===

/// Errors related to favorites storage.
#[derive(Debug)]
pub enum FavoriteError {
    /// The favorite kind is not one of games, apps or movies.
    InvalidKind(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for FavoriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteError::InvalidKind(kind) => write!(f, "Invalid favorite kind: {}", kind),
            FavoriteError::DatabaseError(msg) => {
                write!(f, "Favorites database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for FavoriteError {}

impl From<rusqlite::Error> for FavoriteError {
    fn from(e: rusqlite::Error) -> Self {
        FavoriteError::DatabaseError(e.to_string())
    }
}

// === PlaytimeError ===

/// Errors related to playtime tracking.
#[derive(Debug)]
pub enum PlaytimeError {
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for PlaytimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaytimeError::DatabaseError(msg) => write!(f, "Playtime database error: {}", msg),
        }
    }
}

impl std::error::Error for PlaytimeError {}

impl From<rusqlite::Error> for PlaytimeError {
    fn from(e: rusqlite::Error) -> Self {
        PlaytimeError::DatabaseError(e.to_string())
    }
}
