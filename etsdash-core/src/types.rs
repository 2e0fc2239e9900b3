//! Core types and constants for the dashboard client

use serde::{Deserialize, Serialize};

/// Fixed port the companion desktop telemetry server listens on
pub const SERVER_PORT: u16 = 25555;

/// Path of the skin list document served by the telemetry server
pub const SKINS_PATH: &str = "/config.json";

/// Preference key under which the last-known server address is stored
pub const SERVER_IP_KEY: &str = "serverIp";

/// Default skin fetch timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 3000;

/// Build an absolute telemetry server URL for `path`.
///
/// `path` is appended verbatim and is expected to start with `/`.
pub fn server_url(server_ip: &str, path: &str) -> String {
    format!("http://{}:{}{}", server_ip, SERVER_PORT, path)
}

/// Descriptor of a dashboard skin (visual gauge layout).
///
/// Values are taken verbatim from the telemetry server; nothing beyond
/// JSON typing is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinConfiguration {
    /// Unique skin name, matched against the `skin` query parameter
    pub name: String,
    /// Human readable title
    pub title: String,
    /// Skin author
    pub author: String,
    /// Telemetry refresh rate requested by the skin
    pub refresh_rate: f64,
    /// Design width in pixels
    pub width: i64,
    /// Design height in pixels
    pub height: i64,
}
