use serde::{Deserialize, Serialize};

use super::tab::TabId;

/// Opaque handle to an embedded content frame owned by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Severity of a transient user notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient notification ("toast") raised to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Everything the core asks of the UI layer, queued for an embedder to apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    FrameCreated { tab_id: TabId, frame: FrameHandle, src: String },
    FrameDestroyed { frame: FrameHandle },
    FrameShown { frame: FrameHandle },
    FrameLoad { frame: FrameHandle, src: String },
    FrameReload { frame: FrameHandle },
    Fullscreen { frame: FrameHandle },
    TabLabel { tab_id: TabId, label: String },
    AddressBar { value: String },
    Favicon { tab_id: TabId, url: String },
    Notice { notice: Notice },
}

/// Identifies one navigation of one tab; frame-load reports must carry it back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavTicket {
    pub tab_id: TabId,
    pub seq: u64,
}

/// Result of a navigation entry point that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// The frame was pointed at `proxied`.
    Loaded {
        ticket: NavTicket,
        real_url: String,
        proxied: String,
    },
    /// Nothing to do: empty input, or the history pointer is already at an end.
    Ignored,
    /// A newer navigation started in the same tab before this one committed.
    Superseded,
}
