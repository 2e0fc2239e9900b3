//! Default path resolution for configuration files
//!
//! Uses XDG Base Directory specification when available, with sensible fallbacks.

use std::path::PathBuf;

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("etsdash")
}

/// Returns the default path for the client settings file.
///
/// - Linux/macOS: `~/.config/etsdash/settings.toml`
/// - Fallback: `/etc/etsdash/settings.toml`
pub fn default_settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Returns the default path of the file-backed preference store.
///
/// - Linux/macOS: `~/.config/etsdash/preferences.toml`
/// - Fallback: `/etc/etsdash/preferences.toml`
pub fn default_preferences_path() -> PathBuf {
    config_dir().join("preferences.toml")
}
