//! Platform capabilities used by the dashboard configuration
//!
//! The configuration reaches the host platform only through two narrow
//! interfaces:
//! - [`PreferenceStore`] - async string key/value persistence
//! - [`WakeLock`] - keep the device from sleeping while the dashboard runs
//!
//! Each has a native implementation and an inert one. [`Capabilities`]
//! bundles the pair selected for the current platform.

mod preferences;
mod wake_lock;

pub use preferences::{FilePreferenceStore, InertPreferenceStore, PreferenceStore};
pub use wake_lock::{CommandWakeLock, InertWakeLock, WakeLock};

use crate::location::{PageLocation, Platform};
use crate::settings::DashSettings;
use etsdash_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Capability implementations injected into a [`crate::Configuration`].
#[derive(Clone)]
pub struct Capabilities {
    /// Persistent preference storage
    pub preferences: Arc<dyn PreferenceStore>,
    /// Device sleep inhibitor
    pub wake_lock: Arc<dyn WakeLock>,
}

impl Capabilities {
    /// Bundle explicit capability implementations.
    pub fn new(preferences: Arc<dyn PreferenceStore>, wake_lock: Arc<dyn WakeLock>) -> Self {
        Self {
            preferences,
            wake_lock,
        }
    }

    /// Capabilities that do nothing, used outside the native shell.
    pub fn inert() -> Self {
        Self::new(Arc::new(InertPreferenceStore), Arc::new(InertWakeLock))
    }

    /// Select capabilities for the platform `location` is hosted on.
    ///
    /// Browser pages get inert capabilities. Native shells get the
    /// file-backed preference store, and a command wake lock when one is
    /// configured in `settings`.
    pub fn for_location(location: &PageLocation, settings: &DashSettings) -> Result<Self> {
        match location.platform() {
            Platform::Browser => {
                debug!("Browser environment - using inert capabilities");
                Ok(Self::inert())
            }
            Platform::NativeShell => {
                debug!(
                    "Native shell - preferences at {}",
                    settings.preferences_path.display()
                );
                let preferences: Arc<dyn PreferenceStore> =
                    Arc::new(FilePreferenceStore::new(settings.preferences_path.clone()));
                let wake_lock: Arc<dyn WakeLock> = match &settings.wake_lock_command {
                    Some(argv) => Arc::new(CommandWakeLock::new(argv.clone())?),
                    None => Arc::new(InertWakeLock),
                };
                Ok(Self::new(preferences, wake_lock))
            }
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}
