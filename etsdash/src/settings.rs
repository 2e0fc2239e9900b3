//! Client settings management
//!
//! Handles loading and layering the dashboard client settings.

use etsdash_core::{
    default_preferences_path, default_settings_path, DashError, Result,
    DEFAULT_REQUEST_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Upper bound accepted for the skin fetch timeout
const MAX_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Dashboard client settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashSettings {
    /// Skin list request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// File used by the native preference store
    pub preferences_path: PathBuf,

    /// Sleep inhibitor command for the native wake lock (program and arguments)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_lock_command: Option<Vec<String>>,
}

impl Default for DashSettings {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            preferences_path: default_preferences_path(),
            wake_lock_command: None,
        }
    }
}

impl DashSettings {
    /// Skin list request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Save settings to `path` as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a new builder for constructing settings
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Settings from defaults, the default settings file, and the environment.
    pub fn from_environment() -> Result<Self> {
        SettingsBuilder::new()
            .with_settings_file(&default_settings_path())
            .with_env_overrides()
            .build()
    }
}

/// Values supplied by one settings source
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsLayer {
    request_timeout_ms: Option<u64>,
    preferences_path: Option<PathBuf>,
    wake_lock_command: Option<Vec<String>>,
}

impl SettingsLayer {
    /// Values of `self`, with gaps filled from `lower`.
    fn or(self, lower: SettingsLayer) -> SettingsLayer {
        SettingsLayer {
            request_timeout_ms: self.request_timeout_ms.or(lower.request_timeout_ms),
            preferences_path: self.preferences_path.or(lower.preferences_path),
            wake_lock_command: self.wake_lock_command.or(lower.wake_lock_command),
        }
    }
}

/// Builder for client settings with validation and layering support
///
/// Sources rank the same whatever order they are added in:
/// 1. Explicit `with_*` calls
/// 2. Environment variables
/// 3. Settings file
///
/// Unset values fall back to [`DashSettings::default`] in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    explicit: SettingsLayer,
    env: SettingsLayer,
    file: SettingsLayer,
}

impl SettingsBuilder {
    /// Create a new settings builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request timeout in milliseconds (with validation)
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Result<Self> {
        Self::validate_timeout(timeout_ms)?;
        self.explicit.request_timeout_ms = Some(timeout_ms);
        Ok(self)
    }

    /// Set preference file path (with validation)
    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Self::validate_preferences_path(&path)?;
        self.explicit.preferences_path = Some(path);
        Ok(self)
    }

    /// Set wake lock command (with validation)
    pub fn with_wake_lock_command(mut self, argv: Vec<String>) -> Result<Self> {
        Self::validate_wake_lock_command(&argv)?;
        self.explicit.wake_lock_command = Some(argv);
        Ok(self)
    }

    /// Layer values from a TOML settings file.
    ///
    /// A missing or unreadable file leaves the builder unchanged. A later
    /// file overrides an earlier one.
    pub fn with_settings_file(mut self, path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return self;
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(DashError::from)
            .and_then(|content| toml::from_str::<SettingsLayer>(&content).map_err(DashError::from));

        match parsed {
            Ok(file) => {
                self.file = file.or(std::mem::take(&mut self.file));
            }
            Err(e) => debug!("Ignoring settings file {}: {}", path.display(), e),
        }
        self
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(timeout) = std::env::var("ETSDASH_TIMEOUT_MS") {
            if let Ok(timeout) = timeout.parse() {
                if Self::validate_timeout(timeout).is_ok() {
                    self.env.request_timeout_ms = Some(timeout);
                }
            }
        }

        if let Ok(path) = std::env::var("ETSDASH_PREFERENCES") {
            let path = PathBuf::from(path);
            if Self::validate_preferences_path(&path).is_ok() {
                self.env.preferences_path = Some(path);
            }
        }

        if let Ok(command) = std::env::var("ETSDASH_WAKE_LOCK") {
            let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
            if Self::validate_wake_lock_command(&argv).is_ok() {
                self.env.wake_lock_command = Some(argv);
            }
        }

        self
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<DashSettings> {
        let defaults = DashSettings::default();
        let layered = self.explicit.or(self.env).or(self.file);

        let request_timeout_ms = layered
            .request_timeout_ms
            .unwrap_or(defaults.request_timeout_ms);
        let preferences_path = layered
            .preferences_path
            .unwrap_or(defaults.preferences_path);

        Self::validate_timeout(request_timeout_ms)?;
        Self::validate_preferences_path(&preferences_path)?;
        if let Some(argv) = &layered.wake_lock_command {
            Self::validate_wake_lock_command(argv)?;
        }

        Ok(DashSettings {
            request_timeout_ms,
            preferences_path,
            wake_lock_command: layered.wake_lock_command,
        })
    }

    /// Validate timeout value
    fn validate_timeout(timeout_ms: u64) -> Result<()> {
        if timeout_ms == 0 {
            return Err(DashError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if timeout_ms > MAX_REQUEST_TIMEOUT_MS {
            return Err(DashError::Config(format!(
                "Request timeout must be less than or equal to {} ms",
                MAX_REQUEST_TIMEOUT_MS
            )));
        }

        Ok(())
    }

    fn validate_preferences_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(DashError::Config(
                "Preferences path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_wake_lock_command(argv: &[String]) -> Result<()> {
        if argv.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(DashError::Config(
                "Wake lock command cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
