//! ETS Dashboard Core Library
//!
//! Shared types, constants, and user-facing strings for the ETS telemetry
//! mobile dashboard. This crate is used by the `etsdash` configuration client.

pub mod api;
pub mod config;
pub mod error;
pub mod strings;
pub mod types;

// Re-export commonly used types
pub use api::SkinsResponse;
pub use config::{default_preferences_path, default_settings_path};
pub use error::*;
pub use types::*;
