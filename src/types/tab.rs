use serde::{Deserialize, Serialize};

use super::frame::FrameHandle;
use super::settings::ProxyBackend;

/// Identifier of a logical tab. Allocated from a counter, never reused.
pub type TabId = u64;

/// Label shown for a tab before anything has loaded in it.
pub const NEW_TAB_TITLE: &str = "New Tab";

/// Represents a browser tab with its own navigation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    /// Last known real (unproxied) destination. Empty for a fresh tab.
    pub current_url: String,
    pub history: Vec<String>,
    /// `None` until the first navigation, then always a valid index into `history`.
    pub history_index: Option<usize>,
    /// Frame rendering this tab, attached by the navigation controller.
    pub frame: Option<FrameHandle>,
    pub favicon: Option<String>,
    /// Sequence number of the latest navigation started in this tab.
    pub nav_seq: u64,
    /// Backend whose codec produced the source currently loaded in the frame.
    pub loaded_with: Option<ProxyBackend>,
}

impl Tab {
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            title: NEW_TAB_TITLE.to_string(),
            current_url: String::new(),
            history: Vec::new(),
            history_index: None,
            frame: None,
            favicon: None,
            nav_seq: 0,
            loaded_with: None,
        }
    }

    /// Appends a visited URL and moves the pointer to it.
    ///
    /// History is an append-only log: entries ahead of the pointer are kept.
    pub fn push_history(&mut self, url: &str) {
        self.history.push(url.to_string());
        self.history_index = Some(self.history.len() - 1);
        self.current_url = url.to_string();
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.history_index, Some(i) if i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.history_index, Some(i) if i + 1 < self.history.len())
    }

    /// Moves the pointer one entry back and returns the URL it now points at.
    pub fn step_back(&mut self) -> Option<String> {
        if !self.can_go_back() {
            return None;
        }
        let index = self.history_index? - 1;
        self.history_index = Some(index);
        self.current_url = self.history[index].clone();
        Some(self.current_url.clone())
    }

    /// Moves the pointer one entry forward and returns the URL it now points at.
    pub fn step_forward(&mut self) -> Option<String> {
        if !self.can_go_forward() {
            return None;
        }
        let index = self.history_index? + 1;
        self.history_index = Some(index);
        self.current_url = self.history[index].clone();
        Some(self.current_url.clone())
    }

    /// Starts a new navigation generation and returns its sequence number.
    pub fn next_seq(&mut self) -> u64 {
        self.nav_seq += 1;
        self.nav_seq
    }
}
