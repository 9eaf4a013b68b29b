//! Reconciles a tab with what its frame actually landed on.
//!
//! The proxy runtime can redirect on its own, so after every load the tab's
//! label, `current_url` and favicon are refreshed from the frame. Each step
//! absorbs its own failure; a cross-origin title does not stop the URL check.

use url::Url;

use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::frame_host::FrameHost;
use crate::services::proxy_codec::ProxyCodec;
use crate::types::frame::NavTicket;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain=";

/// Favicon lookup URL for a page.
pub fn favicon_url(page_url: &str) -> String {
    format!("{}{}&sz=256", FAVICON_SERVICE, page_url)
}

/// Host part of `url`, if it parses as an absolute URL with a host.
pub fn hostname_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// What a frame-load report resulted in.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The report belonged to a superseded navigation or a closed tab.
    Stale,
    Synced {
        title: String,
        /// Set when the frame landed somewhere other than `current_url`.
        redirected_to: Option<String>,
    },
}

/// Applies a frame-load report to the tab named by `ticket`.
///
/// `codec` must be the currently selected one. A frame whose source was
/// produced by the other backend is never decoded.
pub fn on_frame_load<H: FrameHost>(
    tabs: &mut TabManager,
    host: &mut H,
    codec: &ProxyCodec,
    ticket: NavTicket,
) -> SyncOutcome {
    let is_active = tabs.active_tab_id() == Some(ticket.tab_id);
    let Some(tab) = tabs.find_mut(ticket.tab_id) else {
        log::debug!("[SYNC] tab {} is gone", ticket.tab_id);
        return SyncOutcome::Stale;
    };
    if tab.nav_seq != ticket.seq {
        log::debug!(
            "[SYNC] dropping load {} for tab {}, latest is {}",
            ticket.seq,
            tab.id,
            tab.nav_seq
        );
        return SyncOutcome::Stale;
    }
    let Some(frame) = tab.frame else {
        return SyncOutcome::Stale;
    };

    let title = match host.document_title(frame) {
        Ok(Some(title)) if !title.trim().is_empty() => title,
        Ok(_) => hostname_of(&tab.current_url).unwrap_or_else(|| tab.title.clone()),
        Err(e) => {
            log::debug!("[SYNC] title unavailable for tab {}: {}", tab.id, e);
            hostname_of(&tab.current_url).unwrap_or_else(|| tab.title.clone())
        }
    };
    tab.title = title.clone();
    host.set_tab_label(tab.id, &title);

    if tab.loaded_with != Some(codec.backend()) {
        log::debug!(
            "[SYNC] tab {} was loaded by another backend, not decoding",
            tab.id
        );
        return SyncOutcome::Synced {
            title,
            redirected_to: None,
        };
    }

    let mut redirected_to = None;
    if let Some(src) = host.current_src(frame) {
        match codec.decode(&src) {
            Ok(real) if !real.is_empty() && real != tab.current_url => {
                log::info!("[SYNC] tab {} landed on {}", tab.id, real);
                tab.current_url = real.clone();
                let icon = favicon_url(&real);
                tab.favicon = Some(icon.clone());
                if is_active {
                    host.set_address_bar(&real);
                }
                host.set_favicon(tab.id, &icon);
                redirected_to = Some(real);
            }
            Ok(_) => {}
            Err(e) => log::debug!("[SYNC] cannot decode frame source: {}", e),
        }
    }

    SyncOutcome::Synced {
        title,
        redirected_to,
    }
}
