//! Configuration file locations for the dashboard client
//!
//! The client keeps two small TOML files in the user's config directory:
//! - `settings.toml` - layered client settings (timeouts, capabilities)
//! - `preferences.toml` - values persisted by the native preference store

mod paths;

pub use paths::{default_preferences_path, default_settings_path};
