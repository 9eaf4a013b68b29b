// Portal platform paths
// Config and data directories for Linux, macOS and Windows, selected with
// `cfg(target_os)` at compile time.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "portal-browser";

fn env_dir(var: &str) -> Option<PathBuf> {
    env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    env_dir("HOME").unwrap_or_else(|| PathBuf::from("/tmp"))
}

/// Returns the directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/portal-browser` or `~/.config/portal-browser`
/// - **macOS**: `~/Library/Application Support/portal-browser`
/// - **Windows**: `%APPDATA%/portal-browser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        env_dir("APPDATA")
            .unwrap_or_else(|| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"))
            .join(APP_DIR)
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env_dir("XDG_CONFIG_HOME")
            .unwrap_or_else(|| home_dir().join(".config"))
            .join(APP_DIR)
    }
}

/// Returns the directory holding the favorites database.
///
/// - **Linux**: `$XDG_DATA_HOME/portal-browser` or `~/.local/share/portal-browser`
/// - **macOS**, **Windows**: same as the config directory
pub fn get_data_dir() -> PathBuf {
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env_dir("XDG_DATA_HOME")
            .unwrap_or_else(|| home_dir().join(".local").join("share"))
            .join(APP_DIR)
    }
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        get_config_dir()
    }
}
