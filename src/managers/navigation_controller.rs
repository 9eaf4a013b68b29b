//! Navigation Controller.
//!
//! Drives the tab registry and the host's frames: resolves address-bar input,
//! records history, encodes through the selected proxy backend and loads the
//! result into the tab's frame. Each navigation bumps the tab's sequence
//! number; completions carrying an older number are dropped.

use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::frame_host::FrameHost;
use crate::services::frame_sync::{self, favicon_url, SyncOutcome};
use crate::services::geo_shard::GeoShardResolver;
use crate::services::input_resolver;
use crate::services::proxy_codec::ProxyCodec;
use crate::types::errors::{NavigationError, TabError};
use crate::types::frame::{NavOutcome, NavTicket, Notice};
use crate::types::settings::{PortalSettings, ProxySettings, SearchEngine};
use crate::types::tab::{Tab, TabId};

const LOADING_LABEL: &str = "Loading...";
const LOAD_FAILED_MESSAGE: &str =
    "There was a problem loading the page. Check the console for more info.";

/// The slice of settings navigation reads.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    pub proxy: ProxySettings,
    pub search_engine: SearchEngine,
    pub new_tab_page: String,
}

impl NavigationConfig {
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self {
            proxy: settings.proxy.clone(),
            search_engine: settings.search.engine,
            new_tab_page: settings.general.new_tab_page.clone(),
        }
    }
}

/// A navigation that has claimed a sequence number but not yet committed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNavigation {
    pub ticket: NavTicket,
    /// Trimmed, non-empty address-bar input.
    pub input: String,
}

/// Owns the tabs and drives the host on their behalf.
pub struct NavigationController<H: FrameHost> {
    tabs: TabManager,
    host: H,
    config: NavigationConfig,
    geo: GeoShardResolver,
}

impl<H: FrameHost> NavigationController<H> {
    /// Creates a controller with one fresh tab open.
    pub fn new(host: H, settings: &PortalSettings) -> Self {
        let mut controller = Self {
            tabs: TabManager::new(),
            host,
            config: NavigationConfig::from_settings(settings),
            geo: GeoShardResolver::new(settings.geo_shard.clone()),
        };
        controller.new_tab();
        controller
    }

    /// Picks up changed settings. Frames already loaded are not re-encoded.
    pub fn apply_settings(&mut self, settings: &PortalSettings) {
        self.config = NavigationConfig::from_settings(settings);
        if self.geo.settings() != &settings.geo_shard {
            self.geo = GeoShardResolver::new(settings.geo_shard.clone());
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get_active_tab()
    }

    /// Codec of the backend selected right now.
    pub fn codec(&self) -> ProxyCodec {
        ProxyCodec::from_settings(&self.config.proxy)
    }

    // ─── Tabs ───

    /// Opens a tab on the new-tab page and makes it active.
    pub fn new_tab(&mut self) -> TabId {
        let tab = self.tabs.create_tab();
        let id = tab.id;
        tab.frame = Some(self.host.create_frame(id, &self.config.new_tab_page));
        self.show(id);
        id
    }

    /// Activates `tab_id`. Unknown ids are ignored.
    pub fn switch_tab(&mut self, tab_id: TabId) -> bool {
        if !self.tabs.switch_to(tab_id) {
            return false;
        }
        self.show(tab_id);
        true
    }

    /// Closes `tab_id`, refusing with a notice when it is the last one.
    pub fn close_tab(&mut self, tab_id: TabId) -> Result<(), TabError> {
        let was_active = self.tabs.active_tab_id() == Some(tab_id);
        let removed = match self.tabs.close_tab(tab_id) {
            Ok(tab) => tab,
            Err(TabError::LastTab) => {
                self.host.notify(Notice::error(TabError::LastTab.to_string()));
                return Err(TabError::LastTab);
            }
            Err(e) => return Err(e),
        };
        if let Some(frame) = removed.frame {
            self.host.destroy_frame(frame);
        }
        if was_active {
            if let Some(id) = self.tabs.active_tab_id() {
                self.show(id);
            }
        }
        Ok(())
    }

    fn show(&mut self, tab_id: TabId) {
        if let Some(tab) = self.tabs.find(tab_id) {
            if let Some(frame) = tab.frame {
                self.host.show_frame(frame);
            }
            self.host.set_address_bar(&tab.current_url);
        }
    }

    // ─── Navigation ───

    /// Navigates the active tab to address-bar `input`.
    pub async fn nav(&mut self, input: &str) -> Result<NavOutcome, NavigationError> {
        let Some(pending) = self.prepare(input)? else {
            return Ok(NavOutcome::Ignored);
        };
        let destination = self.resolve(&pending).await;
        self.commit(pending, &destination)
    }

    /// First half of [`nav`](Self::nav): claims a sequence number in the active
    /// tab. `None` for blank input.
    pub fn prepare(&mut self, input: &str) -> Result<Option<PendingNavigation>, NavigationError> {
        let Some(trimmed) = input_resolver::normalize(input) else {
            return Ok(None);
        };
        let tab = self
            .tabs
            .get_active_tab_mut()
            .ok_or(NavigationError::NoActiveTab)?;
        let seq = tab.next_seq();
        Ok(Some(PendingNavigation {
            ticket: NavTicket { tab_id: tab.id, seq },
            input: trimmed.to_string(),
        }))
    }

    /// Resolves the destination, including the bounded geo-shard lookup.
    pub async fn resolve(&self, pending: &PendingNavigation) -> String {
        input_resolver::resolve_trimmed(&pending.input, self.config.search_engine, &self.geo).await
    }

    /// Second half of [`nav`](Self::nav): records and loads `destination`
    /// unless a newer navigation started in the tab meanwhile.
    pub fn commit(
        &mut self,
        pending: PendingNavigation,
        destination: &str,
    ) -> Result<NavOutcome, NavigationError> {
        let ticket = pending.ticket;
        let Some(tab) = self.tabs.find_mut(ticket.tab_id) else {
            log::debug!("[NAV] tab {} closed before commit", ticket.tab_id);
            return Ok(NavOutcome::Superseded);
        };
        if tab.nav_seq != ticket.seq {
            log::debug!(
                "[NAV] dropping navigation {} in tab {}, latest is {}",
                ticket.seq,
                tab.id,
                tab.nav_seq
            );
            return Ok(NavOutcome::Superseded);
        }
        log::info!("[NAV] tab {} -> {}", tab.id, destination);
        tab.push_history(destination);
        self.go(ticket.tab_id)
    }

    /// Steps the active tab one entry back. No-op at the oldest entry.
    pub fn back(&mut self) -> Result<NavOutcome, NavigationError> {
        let tab = self
            .tabs
            .get_active_tab_mut()
            .ok_or(NavigationError::NoActiveTab)?;
        if tab.step_back().is_none() {
            return Ok(NavOutcome::Ignored);
        }
        tab.next_seq();
        let id = tab.id;
        self.go(id)
    }

    /// Steps the active tab one entry forward. No-op at the newest entry.
    pub fn forward(&mut self) -> Result<NavOutcome, NavigationError> {
        let tab = self
            .tabs
            .get_active_tab_mut()
            .ok_or(NavigationError::NoActiveTab)?;
        if tab.step_forward().is_none() {
            return Ok(NavOutcome::Ignored);
        }
        tab.next_seq();
        let id = tab.id;
        self.go(id)
    }

    /// Reloads the active frame in place and returns the ticket its load
    /// report must carry.
    pub fn reload(&mut self) -> Result<NavTicket, NavigationError> {
        let tab = self
            .tabs
            .get_active_tab_mut()
            .ok_or(NavigationError::NoActiveTab)?;
        let frame = tab.frame.ok_or(NavigationError::NoFrame(tab.id))?;
        let ticket = NavTicket {
            tab_id: tab.id,
            seq: tab.next_seq(),
        };
        if let Err(e) = self.host.reload(frame) {
            log::error!("[LOAD] reload of tab {} failed: {}", ticket.tab_id, e);
            self.host.notify(Notice::error(LOAD_FAILED_MESSAGE));
            return Err(e.into());
        }
        Ok(ticket)
    }

    pub fn request_fullscreen(&mut self) -> Result<(), NavigationError> {
        let tab = self.tabs.get_active_tab().ok_or(NavigationError::NoActiveTab)?;
        let frame = tab.frame.ok_or(NavigationError::NoFrame(tab.id))?;
        if let Err(e) = self.host.request_fullscreen(frame) {
            log::warn!("[LOAD] fullscreen refused: {}", e);
            self.host.notify(Notice::error("Unable to enter fullscreen"));
            return Err(e.into());
        }
        Ok(())
    }

    /// Loads the tab's `current_url` through the selected codec.
    fn go(&mut self, tab_id: TabId) -> Result<NavOutcome, NavigationError> {
        let codec = self.codec();
        let is_active = self.tabs.active_tab_id() == Some(tab_id);
        let tab = self
            .tabs
            .find_mut(tab_id)
            .ok_or(NavigationError::NoActiveTab)?;
        let frame = tab.frame.ok_or(NavigationError::NoFrame(tab_id))?;
        let ticket = NavTicket {
            tab_id,
            seq: tab.nav_seq,
        };
        let real_url = tab.current_url.clone();
        let proxied = codec.encode(&real_url);

        let previous_title = std::mem::replace(&mut tab.title, LOADING_LABEL.to_string());
        self.host.set_tab_label(tab_id, LOADING_LABEL);
        if is_active {
            self.host.set_address_bar(&real_url);
        }
        let icon = favicon_url(&real_url);
        tab.favicon = Some(icon.clone());
        self.host.set_favicon(tab_id, &icon);

        match self.host.load(frame, &proxied) {
            Ok(()) => {
                tab.loaded_with = Some(codec.backend());
                log::info!("[LOAD] tab {} via {}: {}", tab_id, codec.backend(), proxied);
                Ok(NavOutcome::Loaded {
                    ticket,
                    real_url,
                    proxied,
                })
            }
            Err(e) => {
                log::error!("[LOAD] There was an error while loading the page: {}", e);
                self.host.set_tab_label(tab_id, &previous_title);
                tab.title = previous_title;
                self.host.notify(Notice::error(LOAD_FAILED_MESSAGE));
                Err(e.into())
            }
        }
    }

    // ─── Frame events ───

    /// Reconciles the tab after its frame reports a finished load.
    pub fn on_frame_load(&mut self, ticket: NavTicket) -> SyncOutcome {
        let codec = self.codec();
        frame_sync::on_frame_load(&mut self.tabs, &mut self.host, &codec, ticket)
    }
}
