//! App Core for the portal.
//!
//! Holds the settings engine, the favorites and playtime database and the
//! navigation controller, plus the runtime that drives navigation's async lookups.

use std::error::Error;

use crate::database::connection::Database;
use crate::managers::navigation_controller::NavigationController;
use crate::managers::playtime_manager::{self, PlaytimeManager, PlaytimeManagerTrait};
use crate::services::frame_host::EventFrameHost;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::frame::HostEvent;

/// Central application struct.
///
/// `FavoritesManager` and `PlaytimeManager` borrow the connection, so they are
/// created on demand via `XManager::new(app.db.connection())`.
pub struct App {
    pub db: Database,
    pub settings_engine: SettingsEngine,
    pub navigator: NavigationController<EventFrameHost>,
    pub runtime: tokio::runtime::Runtime,
}

impl App {
    /// Opens the database at `db_path`, loads settings (from `settings_path`
    /// or the platform config directory) and opens the first tab.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, Box<dyn Error>> {
        let db = Database::open(db_path)?;
        PlaytimeManager::new(db.connection()).start_session(playtime_manager::now_ms())?;

        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            log::warn!(
                "[SETTINGS] {} unreadable, using defaults: {}",
                settings_engine.get_config_path(),
                e
            );
        }

        let navigator = NavigationController::new(EventFrameHost::new(), settings_engine.get_settings());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            db,
            settings_engine,
            navigator,
            runtime,
        })
    }

    /// Pushes the current settings into the navigator. Call after any change.
    pub fn settings_changed(&mut self) {
        self.navigator.apply_settings(self.settings_engine.get_settings());
    }

    /// Takes the UI events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.navigator.host_mut().drain_events()
    }
}
