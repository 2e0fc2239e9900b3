//! HTTP client for fetching the skin list from the telemetry server.

use etsdash_core::{DashError, Result, SkinConfiguration, SkinsResponse};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client for the telemetry server's `/config.json` document.
///
/// Requests are single-shot: there is no retry, and the configured timeout
/// bounds the whole request including the body.
#[derive(Debug, Clone)]
pub struct SkinClient {
    client: Client,
}

impl SkinClient {
    /// Create a client whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("etsdash/", env!("CARGO_PKG_VERSION")))
            // Blocking reloads run on short-lived runtimes; pooled
            // connections must not outlive them.
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| DashError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch and decode the skin list at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The server is unreachable or the request times out
    /// - The HTTP status code indicates failure
    /// - The body is not a valid skin list document
    pub async fn fetch_skins(&self, url: &str) -> Result<Vec<SkinConfiguration>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(e, url))?;

        Self::handle_response(response, url).await
    }

    /// Check the status and decode the body of a skin list response.
    async fn handle_response(response: Response, url: &str) -> Result<Vec<SkinConfiguration>> {
        let status = response.status();
        if !status.is_success() {
            return Err(DashError::Status {
                status: status.as_u16(),
                endpoint: url.to_string(),
            });
        }

        let text = response.text().await.map_err(|e| request_error(e, url))?;
        let document = SkinsResponse::from_json(&text)?;
        Ok(document.skins)
    }
}

/// Map a transport error, keeping timeouts distinguishable.
fn request_error(err: reqwest::Error, url: &str) -> DashError {
    if err.is_timeout() {
        DashError::Timeout(url.to_string())
    } else {
        DashError::Http(format!("{}: {}", url, err))
    }
}
