//! ETS Dashboard configuration client
//!
//! Runtime configuration for the mobile telemetry dashboard: resolves the
//! address of the desktop telemetry server, fetches the list of available
//! skins from it, and selects the active skin from the page's query string.
//!
//! # Public API
//!
//! The primary entry point is [`Configuration`], built from the page
//! [`PageLocation`], the platform [`Capabilities`], and [`DashSettings`].
//!
//! ```no_run
//! use etsdash::{Capabilities, Configuration, DashSettings, PageLocation};
//!
//! # async fn example() -> etsdash_core::Result<()> {
//! let location = PageLocation::new("file:///android_asset/www/index.html?skin=default");
//! let settings = DashSettings::from_environment()?;
//! let capabilities = Capabilities::for_location(&location, &settings)?;
//!
//! let config = Configuration::start(location, capabilities, &settings).await?;
//! let config = config.initialized().await;
//!
//! let server_ip = config.server_ip().await;
//! config.reload(&server_ip).await?;
//! if let Some(skin) = config.skin_configuration().await {
//!     println!("Active skin: {} ({}x{})", skin.title, skin.width, skin.height);
//! }
//! # Ok(())
//! # }
//! ```

/// Platform capabilities (preferences, wake lock).
pub mod capabilities;

/// HTTP client for the telemetry server's skin list.
pub mod client;

pub mod configuration;
pub mod location;

/// Layered client settings.
pub mod settings;

#[cfg(test)]
pub mod test_utils;

pub use capabilities::{
    Capabilities, CommandWakeLock, FilePreferenceStore, InertPreferenceStore, InertWakeLock,
    PreferenceStore, WakeLock,
};
pub use configuration::{Configuration, ReloadOutcome};
pub use location::{query_parameter, PageLocation, Platform};
pub use settings::{DashSettings, SettingsBuilder};
