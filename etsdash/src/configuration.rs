//! Dashboard runtime configuration
//!
//! Resolves the telemetry server address, holds the list of available skins,
//! and selects the active skin from the page's query string.

use crate::capabilities::Capabilities;
use crate::client::SkinClient;
use crate::location::{PageLocation, Platform};
use crate::settings::DashSettings;
use etsdash_core::{server_url, DashError, Result, SkinConfiguration, SERVER_IP_KEY, SKINS_PATH};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// Result of a [`Configuration::reload`] that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Empty address; nothing was changed or requested
    Skipped,
    /// Skin list replaced with `skins` entries
    Loaded { skins: usize },
    /// A later reload already applied its response; this successful one was
    /// discarded. A stale failed fetch still returns its error, leaving the
    /// newer skin list in place.
    Superseded,
}

#[derive(Debug, Default)]
struct State {
    server_ip: String,
    skins: Vec<SkinConfiguration>,
    /// Seed of the last response applied to `skins`
    applied_seed: Option<u64>,
}

/// Runtime configuration of the dashboard client.
///
/// Created once at startup and shared through `Arc`. Construction resolves
/// the server address in this order:
///
/// 1. The `ip` query parameter
/// 2. The page host name, when running in a browser
/// 3. The address stored in preferences, when running in a native shell
///
/// The first two complete synchronously. The third completes on a spawned
/// task; await [`initialized`](Self::initialized) before relying on the
/// address.
pub struct Configuration {
    location: PageLocation,
    capabilities: Capabilities,
    client: SkinClient,
    state: RwLock<State>,
    anticache_seed: AtomicU64,
    ready: watch::Sender<bool>,
}

impl Configuration {
    /// Create the configuration and begin resolving the server address.
    ///
    /// # Errors
    ///
    /// In a native shell without an `ip` parameter the stored address is
    /// read on a spawned task, so a Tokio runtime is required there.
    pub fn new(
        location: PageLocation,
        capabilities: Capabilities,
        settings: &DashSettings,
    ) -> Result<Arc<Self>> {
        Self::construct(location, capabilities, settings).map(|(config, _)| config)
    }

    /// Create the configuration and complete an initial skin list fetch.
    ///
    /// The fetch uses the address resolved synchronously during construction,
    /// so it is skipped when the address still comes from preferences.
    /// Its failure is logged, never returned; the skin list is then empty.
    pub async fn start(
        location: PageLocation,
        capabilities: Capabilities,
        settings: &DashSettings,
    ) -> Result<Arc<Self>> {
        let (config, server_ip) = Self::construct(location, capabilities, settings)?;

        if let Err(e) = config.reload(&server_ip).await {
            warn!("Initial skin list fetch failed: {}", e);
        }

        Ok(config)
    }

    fn construct(
        location: PageLocation,
        capabilities: Capabilities,
        settings: &DashSettings,
    ) -> Result<(Arc<Self>, String)> {
        let client = SkinClient::new(settings.request_timeout())?;
        let platform = location.platform();
        let query_ip = location.parameter("ip");

        let runtime = tokio::runtime::Handle::try_current();
        if query_ip.is_empty() && platform == Platform::NativeShell && runtime.is_err() {
            return Err(DashError::Config(
                "Restoring the stored server address requires a Tokio runtime".to_string(),
            ));
        }

        if platform == Platform::NativeShell {
            capabilities.wake_lock.keep_awake();
        }

        let (server_ip, resolved) = if !query_ip.is_empty() {
            info!("Server address '{}' taken from query string", query_ip);
            (query_ip, true)
        } else if platform == Platform::Browser {
            let host = location.host_name();
            info!("Server address '{}' taken from page host", host);
            (host, true)
        } else {
            (String::new(), false)
        };

        let (ready, _) = watch::channel(resolved);
        let config = Arc::new(Self {
            location,
            capabilities,
            client,
            state: RwLock::new(State {
                server_ip: server_ip.clone(),
                ..State::default()
            }),
            anticache_seed: AtomicU64::new(epoch_millis()),
            ready,
        });

        if let (false, Ok(handle)) = (resolved, runtime) {
            let restoring = Arc::clone(&config);
            handle.spawn(async move {
                restoring.restore_saved_address().await;
            });
        }

        Ok((config, server_ip))
    }

    /// Load the stored address, then signal readiness whatever the outcome.
    async fn restore_saved_address(&self) {
        match self.capabilities.preferences.fetch(SERVER_IP_KEY).await {
            Ok(Some(saved)) => {
                let mut state = self.state.write().await;
                // A reload issued meanwhile wins over the stored value
                if state.server_ip.is_empty() {
                    info!("Server address '{}' restored from preferences", saved);
                    state.server_ip = saved;
                }
            }
            Ok(None) => debug!("No stored server address"),
            Err(e) => debug!("Could not read stored server address: {}", e),
        }

        self.ready.send_if_modified(|ready| !std::mem::replace(ready, true));
    }

    /// Wait until the initial server address is resolved.
    pub async fn initialized(self: &Arc<Self>) -> Arc<Self> {
        let mut ready = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = ready.wait_for(|ready| *ready).await;
        Arc::clone(self)
    }

    /// Whether the initial server address is resolved.
    pub fn is_initialized(&self) -> bool {
        *self.ready.borrow()
    }

    /// Switch to `new_server_ip` and fetch its skin list.
    ///
    /// The address is recorded and persisted before the request is made,
    /// so it sticks even when the fetch fails. Preference failures are
    /// ignored. On fetch failure the skin list is cleared and the error
    /// returned, unless a later reload already applied its response. An
    /// empty address is a no-op.
    pub async fn reload(&self, new_server_ip: &str) -> Result<ReloadOutcome> {
        if new_server_ip.is_empty() {
            debug!("Reload skipped: empty server address");
            return Ok(ReloadOutcome::Skipped);
        }

        // Seeds follow the order in which addresses are recorded
        let seed = {
            let mut state = self.state.write().await;
            state.server_ip = new_server_ip.to_string();
            self.anticache_seed.fetch_add(1, Ordering::SeqCst)
        };

        let url = server_url(new_server_ip, &format!("{}?seed={}", SKINS_PATH, seed));
        debug!("Fetching skin list from {}", url);

        let (stored, fetched) = tokio::join!(
            self.capabilities
                .preferences
                .store(SERVER_IP_KEY, new_server_ip),
            self.client.fetch_skins(&url),
        );
        if let Err(e) = stored {
            debug!("Ignoring preference store failure: {}", e);
        }

        let mut state = self.state.write().await;
        if state.applied_seed.is_some_and(|applied| applied > seed) {
            debug!("Discarding stale skin list response (seed {})", seed);
            return fetched.map(|_| ReloadOutcome::Superseded);
        }
        state.applied_seed = Some(seed);

        match fetched {
            Ok(skins) => {
                let count = skins.len();
                info!("Loaded {} skins from {}", count, new_server_ip);
                state.skins = skins;
                Ok(ReloadOutcome::Loaded { skins: count })
            }
            Err(e) => {
                warn!("Failed to load skin list from {}: {}", new_server_ip, e);
                state.skins.clear();
                Err(e)
            }
        }
    }

    /// Blocking form of [`reload`](Self::reload), driven on a private runtime.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime.
    pub fn reload_blocking(&self, new_server_ip: &str) -> Result<ReloadOutcome> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.reload(new_server_ip))
    }

    /// Current server address. Empty until one is resolved.
    pub async fn server_ip(&self) -> String {
        self.state.read().await.server_ip.clone()
    }

    /// Skins from the last applied fetch.
    pub async fn skins(&self) -> Vec<SkinConfiguration> {
        self.state.read().await.skins.clone()
    }

    /// Skin named by the `skin` query parameter.
    ///
    /// Names match exactly; `None` when the parameter is absent or no skin
    /// carries that name.
    pub async fn skin_configuration(&self) -> Option<SkinConfiguration> {
        let name = self.location.parameter("skin");
        if name.is_empty() {
            return None;
        }

        self.state
            .read()
            .await
            .skins
            .iter()
            .find(|skin| skin.name == name)
            .cloned()
    }

    /// Absolute telemetry server URL for `path` at the current address.
    pub async fn url_for(&self, path: &str) -> String {
        server_url(&self.server_ip().await, path)
    }

    /// Read a query-string parameter of the page.
    pub fn parameter(&self, name: &str) -> String {
        self.location.parameter(name)
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn platform(&self) -> Platform {
        self.location.platform()
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
