//! User-facing message strings shown by the dashboard

/// Prefix of the message shown when a skin's `dashboard.html` cannot be loaded
pub const DASHBOARD_HTML_LOAD_FAILED: &str = "Failed to load dashboard.html for skin: ";

// Menu
pub const CONNECTING: &str = "Connecting...";
pub const CONNECTED: &str = "Connected";
pub const DISCONNECTED: &str = "Disconnected";
pub const ENTER_SERVER_IP_MESSAGE: &str = "Please enter server IP address (aa.bb.cc.dd)";
pub const INCORRECT_SERVER_IP_FORMAT: &str = "Entered server IP or hostname has incorrect format.";

// Dashboard
/// Day names, Sunday first
pub const DAY_OF_THE_WEEK: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
pub const NO_TIME_LEFT: &str = "Overdue";
pub const COULD_NOT_CONNECT_TO_SERVER: &str = "Could not connect to the server";
pub const CONNECTED_AND_WAITING_FOR_DRIVE: &str = "Connected, waiting for the drive...";
pub const CONNECTING_TO_SERVER: &str = "Connecting to the server...";

/// Day name for a zero-based day index (0 = Sunday).
pub fn day_of_the_week(index: usize) -> Option<&'static str> {
    DAY_OF_THE_WEEK.get(index).copied()
}

/// Message shown when the dashboard page of `skin` fails to load.
pub fn dashboard_html_load_failed(skin: &str) -> String {
    format!("{}{}", DASHBOARD_HTML_LOAD_FAILED, skin)
}
