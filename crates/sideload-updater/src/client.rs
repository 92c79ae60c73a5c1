//! HTTP client for the version manifest.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::config::UpdateConfig;
use crate::error::{Result, UpdateError};
use crate::release::VersionInfo;

/// User agent string for manifest requests.
pub(crate) const USER_AGENT_VALUE: &str = concat!("sideload/", env!("CARGO_PKG_VERSION"));

/// Client for the update server.
#[derive(Debug, Clone)]
pub struct UpdateClient {
    client: reqwest::Client,
    config: UpdateConfig,
}

impl UpdateClient {
    /// Creates a client for the configured update server.
    pub fn new(config: UpdateConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| UpdateError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Fetches the latest version manifest from the server.
    ///
    /// One GET, no retries, library-default timeouts. A non-success status
    /// maps to [`UpdateError::Server`], an unparseable body to
    /// [`UpdateError::JsonParse`].
    pub async fn fetch_latest(&self) -> Result<VersionInfo> {
        let url = self.config.manifest_url();
        tracing::debug!("Fetching version manifest from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let info: VersionInfo = serde_json::from_str(&body)?;

        Ok(info)
    }

    /// Checks whether a newer build than the running one is available.
    ///
    /// Returns `Some(info)` when the manifest advertises a higher version
    /// code, `None` when the running build is current. Transport and parse
    /// failures propagate; presentation decides what to make of them.
    pub async fn check_for_update(&self) -> Result<Option<VersionInfo>> {
        tracing::info!(
            "Checking for updates (current version: {})",
            self.config.current_version_code
        );

        let info = self.fetch_latest().await?;

        if !info.is_newer_than(self.config.current_version_code) {
            tracing::info!(
                "No update available (current: {}, latest: {})",
                self.config.current_version_code,
                info.version_code
            );
            return Ok(None);
        }

        tracing::info!(
            "Update available: {} -> {} ({})",
            self.config.current_version_code,
            info.version_code,
            info.version_name
        );

        Ok(Some(info))
    }
}
