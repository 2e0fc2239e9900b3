//! Test utilities
//!
//! Provides a mock telemetry server and in-memory capability doubles.

use anyhow::Result;
use async_trait::async_trait;
use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use etsdash_core::{DashError, SkinConfiguration, SkinsResponse, SERVER_PORT};
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::capabilities::{PreferenceStore, WakeLock};

/// Install a test log writer once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("etsdash=debug")
        .with_test_writer()
        .try_init();
}

pub fn skin(name: &str, title: &str) -> SkinConfiguration {
    SkinConfiguration {
        name: name.to_string(),
        title: title.to_string(),
        author: "Funbit".to_string(),
        refresh_rate: 50.0,
        width: 2048,
        height: 1536,
    }
}

pub fn sample_skins() -> Vec<SkinConfiguration> {
    vec![skin("truck1", "Truck One"), skin("truck2", "Truck Two")]
}

/// Scripted reply for a single `/config.json` request
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Skin list served after `delay`
    Skins {
        skins: Vec<SkinConfiguration>,
        delay: Duration,
    },
    /// Bare HTTP status with no body, sent after `delay`
    Status { code: u16, delay: Duration },
    /// Body that is not JSON
    Malformed,
}

/// Mock server state
#[derive(Debug, Clone)]
pub struct MockServerState {
    /// Skins served when no reply is scripted
    pub skins: Arc<Mutex<Vec<SkinConfiguration>>>,
    /// Replies consumed in request arrival order
    pub scripted: Arc<Mutex<VecDeque<MockReply>>>,
    /// `seed` query values in request arrival order
    pub received: Arc<Mutex<Vec<u64>>>,
}

impl Default for MockServerState {
    fn default() -> Self {
        Self {
            skins: Arc::new(Mutex::new(sample_skins())),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockServerState {
    /// Queue a reply for the next unanswered request.
    pub fn script(&self, reply: MockReply) {
        self.scripted.lock().unwrap().push_back(reply);
    }

    /// Seeds received so far.
    pub fn seeds(&self) -> Vec<u64> {
        self.received.lock().unwrap().clone()
    }
}

#[derive(Debug, Deserialize)]
struct SeedQuery {
    seed: u64,
}

/// Mock telemetry server bound to the fixed server port on 127.0.0.1
#[derive(Debug, Default)]
pub struct MockServer {
    state: MockServerState,
}

impl MockServer {
    /// Create a new mock server
    pub fn new() -> Self {
        Self::default()
    }

    /// Start serving on `127.0.0.1:25555`.
    ///
    /// The server runs until the test runtime shuts down.
    pub async fn start(self) -> Result<Self> {
        let app = Router::new()
            .route("/config.json", get(config_handler))
            .with_state(self.state.clone());

        let listener = TcpListener::bind(("127.0.0.1", SERVER_PORT)).await?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", SERVER_PORT))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok(self)
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }
}

async fn config_handler(
    Query(query): Query<SeedQuery>,
    axum::extract::State(state): axum::extract::State<MockServerState>,
) -> axum::response::Response {
    state.received.lock().unwrap().push(query.seed);

    let scripted = state.scripted.lock().unwrap().pop_front();
    let reply = scripted.unwrap_or_else(|| MockReply::Skins {
        skins: state.skins.lock().unwrap().clone(),
        delay: Duration::ZERO,
    });

    match reply {
        MockReply::Skins { skins, delay } => {
            tokio::time::sleep(delay).await;
            Json(SkinsResponse { skins }).into_response()
        }
        MockReply::Status { code, delay } => {
            tokio::time::sleep(delay).await;
            StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        }
        MockReply::Malformed => "<html>not a skin list</html>".into_response(),
    }
}

/// In-memory preference store counting its calls
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
    fail: bool,
    pub fetches: AtomicUsize,
    pub stores: AtomicUsize,
}

impl MemoryPreferenceStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// A store whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn fetch(&self, key: &str) -> etsdash_core::Result<Option<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DashError::Preference("fetch failed".to_string()));
        }
        Ok(self.value(key))
    }

    async fn store(&self, key: &str, value: &str) -> etsdash_core::Result<()> {
        self.stores.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DashError::Preference("store failed".to_string()));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Wake lock counting `keep_awake` calls
#[derive(Debug, Default)]
pub struct CountingWakeLock {
    pub calls: AtomicUsize,
}

impl WakeLock for CountingWakeLock {
    fn keep_awake(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
