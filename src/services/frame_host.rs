//! The seam between the navigation core and whatever renders frames.
//!
//! [`FrameHost`] is everything the controller and frame sync ask of the UI.
//! [`EventFrameHost`] implements it without a UI: each request becomes a
//! [`HostEvent`] queued for an embedder, and the embedder reports frame state
//! (landed source, title, cross-origin status) back through
//! [`EventFrameHost::report_load`].

use std::collections::HashMap;

use crate::types::errors::FrameError;
use crate::types::frame::{FrameHandle, HostEvent, Notice};
use crate::types::tab::TabId;

/// Operations the core needs from the UI layer.
pub trait FrameHost {
    fn create_frame(&mut self, tab_id: TabId, src: &str) -> FrameHandle;
    fn destroy_frame(&mut self, frame: FrameHandle);
    fn show_frame(&mut self, frame: FrameHandle);
    fn load(&mut self, frame: FrameHandle, src: &str) -> Result<(), FrameError>;
    fn reload(&mut self, frame: FrameHandle) -> Result<(), FrameError>;
    fn current_src(&self, frame: FrameHandle) -> Option<String>;
    /// Title of the loaded document; `Err(CrossOrigin)` when it cannot be read.
    fn document_title(&self, frame: FrameHandle) -> Result<Option<String>, FrameError>;
    fn request_fullscreen(&mut self, frame: FrameHandle) -> Result<(), FrameError>;
    fn set_tab_label(&mut self, tab_id: TabId, label: &str);
    fn set_address_bar(&mut self, value: &str);
    fn set_favicon(&mut self, tab_id: TabId, url: &str);
    fn notify(&mut self, notice: Notice);
}

#[derive(Debug, Clone, Default)]
struct FrameState {
    src: String,
    title: Option<String>,
    cross_origin: bool,
}

/// Headless host that queues [`HostEvent`]s.
#[derive(Debug, Default)]
pub struct EventFrameHost {
    frames: HashMap<FrameHandle, FrameState>,
    next_frame: u64,
    events: Vec<HostEvent>,
    load_failure: Option<String>,
}

impl EventFrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all queued events.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Records what the embedder observed after a frame finished loading.
    pub fn report_load(
        &mut self,
        frame: FrameHandle,
        src: &str,
        title: Option<String>,
        cross_origin: bool,
    ) -> Result<(), FrameError> {
        let state = self
            .frames
            .get_mut(&frame)
            .ok_or(FrameError::Detached(frame.0))?;
        state.src = src.to_string();
        state.title = title;
        state.cross_origin = cross_origin;
        Ok(())
    }

    /// Makes every subsequent `load` fail with `reason`, or succeed again with `None`.
    pub fn fail_loads(&mut self, reason: Option<String>) {
        self.load_failure = reason;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FrameHost for EventFrameHost {
    fn create_frame(&mut self, tab_id: TabId, src: &str) -> FrameHandle {
        self.next_frame += 1;
        let frame = FrameHandle(self.next_frame);
        self.frames.insert(
            frame,
            FrameState {
                src: src.to_string(),
                ..FrameState::default()
            },
        );
        self.events.push(HostEvent::FrameCreated {
            tab_id,
            frame,
            src: src.to_string(),
        });
        frame
    }

    fn destroy_frame(&mut self, frame: FrameHandle) {
        if self.frames.remove(&frame).is_some() {
            self.events.push(HostEvent::FrameDestroyed { frame });
        }
    }

    fn show_frame(&mut self, frame: FrameHandle) {
        self.events.push(HostEvent::FrameShown { frame });
    }

    fn load(&mut self, frame: FrameHandle, src: &str) -> Result<(), FrameError> {
        if let Some(reason) = &self.load_failure {
            return Err(FrameError::LoadFailed(reason.clone()));
        }
        let state = self
            .frames
            .get_mut(&frame)
            .ok_or(FrameError::Detached(frame.0))?;
        state.src = src.to_string();
        state.title = None;
        state.cross_origin = false;
        self.events.push(HostEvent::FrameLoad {
            frame,
            src: src.to_string(),
        });
        Ok(())
    }

    fn reload(&mut self, frame: FrameHandle) -> Result<(), FrameError> {
        if !self.frames.contains_key(&frame) {
            return Err(FrameError::Detached(frame.0));
        }
        self.events.push(HostEvent::FrameReload { frame });
        Ok(())
    }

    fn current_src(&self, frame: FrameHandle) -> Option<String> {
        self.frames.get(&frame).map(|s| s.src.clone())
    }

    fn document_title(&self, frame: FrameHandle) -> Result<Option<String>, FrameError> {
        let state = self.frames.get(&frame).ok_or(FrameError::Detached(frame.0))?;
        if state.cross_origin {
            return Err(FrameError::CrossOrigin);
        }
        Ok(state.title.clone())
    }

    fn request_fullscreen(&mut self, frame: FrameHandle) -> Result<(), FrameError> {
        if !self.frames.contains_key(&frame) {
            return Err(FrameError::Detached(frame.0));
        }
        self.events.push(HostEvent::Fullscreen { frame });
        Ok(())
    }

    fn set_tab_label(&mut self, tab_id: TabId, label: &str) {
        self.events.push(HostEvent::TabLabel {
            tab_id,
            label: label.to_string(),
        });
    }

    fn set_address_bar(&mut self, value: &str) {
        self.events.push(HostEvent::AddressBar {
            value: value.to_string(),
        });
    }

    fn set_favicon(&mut self, tab_id: TabId, url: &str) {
        self.events.push(HostEvent::Favicon {
            tab_id,
            url: url.to_string(),
        });
    }

    fn notify(&mut self, notice: Notice) {
        self.events.push(HostEvent::Notice { notice });
    }
}
