//! Wake-lock capability

use etsdash_core::{DashError, Result};
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use tracing::{info, warn};

/// Keeps the device awake while the dashboard runs.
///
/// There is no release operation; the lock is held for the process lifetime.
pub trait WakeLock: Send + Sync {
    /// Request that the device stay awake. Fire-and-forget.
    fn keep_awake(&self);
}

/// Wake lock that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertWakeLock;

impl WakeLock for InertWakeLock {
    fn keep_awake(&self) {}
}

/// Wake lock held by a long-running inhibitor process,
/// e.g. `systemd-inhibit --what=idle sleep infinity`.
///
/// The process is spawned on the first successful `keep_awake` and killed
/// when the wake lock is dropped.
#[derive(Debug)]
pub struct CommandWakeLock {
    argv: Vec<String>,
    child: Mutex<Option<Child>>,
}

impl CommandWakeLock {
    /// Create a wake lock running `argv` (program followed by its arguments).
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(DashError::Config(
                "Wake lock command cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            argv,
            child: Mutex::new(None),
        })
    }

    /// Whether the inhibitor process has been started.
    pub fn is_held(&self) -> bool {
        self.child.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl WakeLock for CommandWakeLock {
    fn keep_awake(&self) {
        let Ok(mut slot) = self.child.lock() else {
            return;
        };
        if slot.is_some() {
            return;
        }

        let spawned = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                info!("Wake lock held by '{}' (pid {})", self.argv[0], child.id());
                *slot = Some(child);
            }
            Err(e) => warn!("Failed to start wake lock '{}': {}", self.argv[0], e),
        }
    }
}

impl Drop for CommandWakeLock {
    fn drop(&mut self) {
        if let Ok(slot) = self.child.get_mut() {
            if let Some(child) = slot.as_mut() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}
