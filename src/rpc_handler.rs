//! RPC method handler for the portal JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdin/stdout.
//! `handle_method` dispatches one call to the navigator, settings or
//! favorites through the shared `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::favorites_manager::{FavoritesManager, FavoritesManagerTrait};
use crate::managers::playtime_manager::{self, format_time, PlaytimeManager, PlaytimeManagerTrait};
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::frame_sync::SyncOutcome;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::errors::FavoriteError;
use crate::types::favorite::{FavoriteItem, FavoriteKind};
use crate::types::frame::{NavOutcome, NavTicket};
use crate::types::playtime::Activity;

fn param_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn param_u64(params: &Value, key: &str) -> Result<u64, String> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| format!("missing {}", key))
}

fn param_kind(params: &Value) -> Result<FavoriteKind, String> {
    param_str(params, "kind")?
        .parse::<FavoriteKind>()
        .map_err(|k| FavoriteError::InvalidKind(k).to_string())
}

fn param_item(params: &Value) -> Result<FavoriteItem, String> {
    let item = params.get("item").cloned().ok_or("missing item")?;
    serde_json::from_value(item).map_err(|e| format!("invalid item: {}", e))
}

fn outcome_json(outcome: NavOutcome) -> Value {
    match outcome {
        NavOutcome::Loaded {
            ticket,
            real_url,
            proxied,
        } => json!({
            "status": "loaded",
            "tab_id": ticket.tab_id,
            "seq": ticket.seq,
            "url": real_url,
            "proxied": proxied,
        }),
        NavOutcome::Ignored => json!({"status": "ignored"}),
        NavOutcome::Superseded => json!({"status": "superseded"}),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tabs ───
        "tab.new" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.navigator.new_tab();
            Ok(json!({"id": id}))
        }
        "tab.switch" => {
            let id = param_u64(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let switched = a.navigator.switch_tab(id);
            Ok(json!({"switched": switched}))
        }
        "tab.close" => {
            let id = param_u64(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.navigator.close_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "active": a.navigator.tabs().active_tab_id()}))
        }
        "tab.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let tabs = a.navigator.tabs();
            Ok(json!({"tabs": tabs.get_all_tabs(), "active": tabs.active_tab_id()}))
        }
        "tab.active" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let tab = a.navigator.active_tab().ok_or("no active tab")?;
            serde_json::to_value(tab).map_err(|e| e.to_string())
        }

        // ─── Navigation ───
        "nav.go" => {
            let input = param_str(params, "input")?;
            let mut guard = app.lock().map_err(|e| e.to_string())?;
            let a = &mut *guard;
            let outcome = a
                .runtime
                .block_on(a.navigator.nav(input))
                .map_err(|e| e.to_string())?;
            if matches!(outcome, NavOutcome::Loaded { .. }) {
                let mut playtime = PlaytimeManager::new(a.db.connection());
                if let Err(e) = playtime.track_activity(Activity::Browsing, playtime_manager::now_ms()) {
                    log::warn!("[PLAYTIME] browsing not tracked: {}", e);
                }
            }
            Ok(outcome_json(outcome))
        }
        "nav.back" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.navigator.back().map_err(|e| e.to_string())?;
            Ok(outcome_json(outcome))
        }
        "nav.forward" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.navigator.forward().map_err(|e| e.to_string())?;
            Ok(outcome_json(outcome))
        }
        "nav.reload" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ticket = a.navigator.reload().map_err(|e| e.to_string())?;
            Ok(json!({"tab_id": ticket.tab_id, "seq": ticket.seq}))
        }
        "nav.fullscreen" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.navigator.request_fullscreen().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Frame reports ───
        "frame.loaded" => {
            let ticket = NavTicket {
                tab_id: param_u64(params, "tab_id")?,
                seq: param_u64(params, "seq")?,
            };
            let src = param_str(params, "src")?;
            let title = params.get("title").and_then(|v| v.as_str()).map(String::from);
            let cross_origin = params
                .get("cross_origin")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            let mut a = app.lock().map_err(|e| e.to_string())?;
            // Reports from superseded navigations must not touch the frame state.
            let frame = a
                .navigator
                .tabs()
                .find(ticket.tab_id)
                .filter(|t| t.nav_seq == ticket.seq)
                .and_then(|t| t.frame);
            let Some(frame) = frame else {
                return Ok(json!({"status": "stale"}));
            };
            a.navigator
                .host_mut()
                .report_load(frame, src, title, cross_origin)
                .map_err(|e| e.to_string())?;
            match a.navigator.on_frame_load(ticket) {
                SyncOutcome::Stale => Ok(json!({"status": "stale"})),
                SyncOutcome::Synced {
                    title,
                    redirected_to,
                } => Ok(json!({
                    "status": "synced",
                    "title": title,
                    "redirected_to": redirected_to,
                })),
            }
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = param_str(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.settings_changed();
            Ok(json!({"ok": true}))
        }

        // ─── Favorites ───
        "favorites.add" => {
            let kind = param_kind(params)?;
            let item = param_item(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = FavoritesManager::new(a.db.connection());
            let outcome = mgr.add(kind, &item).map_err(|e| e.to_string())?;
            Ok(json!({"added": outcome.added, "evicted": outcome.evicted}))
        }
        "favorites.remove" => {
            let kind = param_kind(params)?;
            let id = param_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = FavoritesManager::new(a.db.connection());
            let removed = mgr.remove(kind, id).map_err(|e| e.to_string())?;
            Ok(json!({"removed": removed.is_some()}))
        }
        "favorites.toggle" => {
            let kind = param_kind(params)?;
            let item = param_item(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = FavoritesManager::new(a.db.connection());
            let favorited = mgr.toggle(kind, &item).map_err(|e| e.to_string())?;
            Ok(json!({"favorited": favorited}))
        }
        "favorites.list" => {
            let kind = param_kind(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = FavoritesManager::new(a.db.connection());
            let items = mgr.list(kind).map_err(|e| e.to_string())?;
            Ok(json!({"items": items}))
        }
        "favorites.all" => {
            let limit = params.get("limit").and_then(|v| v.as_u64()).unwrap_or(10) as usize;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = FavoritesManager::new(a.db.connection());
            let items = mgr.list_all(limit).map_err(|e| e.to_string())?;
            Ok(json!({"items": items}))
        }
        "favorites.clear" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = FavoritesManager::new(a.db.connection());
            mgr.clear().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Playtime ───
        "playtime.track" => {
            let activity = Activity::from_name(param_str(params, "activity")?);
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = PlaytimeManager::new(a.db.connection());
            mgr.track_activity(activity, playtime_manager::now_ms())
                .map_err(|e| e.to_string())?;
            Ok(json!({"activity": activity}))
        }
        "playtime.total" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = PlaytimeManager::new(a.db.connection());
            let ms = mgr.total(playtime_manager::now_ms()).map_err(|e| e.to_string())?;
            Ok(json!({"ms": ms, "text": format_time(ms, true)}))
        }
        "playtime.breakdown" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = PlaytimeManager::new(a.db.connection());
            let breakdown = mgr.breakdown(playtime_manager::now_ms()).map_err(|e| e.to_string())?;
            serde_json::to_value(breakdown).map_err(|e| e.to_string())
        }
        "playtime.stats" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = PlaytimeManager::new(a.db.connection());
            let stats = mgr.stats(playtime_manager::now_ms()).map_err(|e| e.to_string())?;
            let text = format_time(stats.total_ms, false);
            Ok(json!({"stats": stats, "text": text}))
        }
        "playtime.format" => {
            let ms = params.get("ms").and_then(|v| v.as_i64()).ok_or("missing ms")?;
            let short = params.get("short").and_then(|v| v.as_bool()).unwrap_or(false);
            Ok(json!({"text": format_time(ms, short)}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
