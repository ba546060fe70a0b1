//! Telemetry sources
//!
//! Where snapshots come from. The dashboard normally polls the backend's
//! `/api/battery-data` endpoint over HTTP; [`crate::demo::DemoSource`]
//! generates readings in-process instead.

use std::future::Future;

use tracing::debug;

use crate::error::FetchError;
use crate::telemetry::Snapshot;

/// Path of the telemetry endpoint on the backend
pub const TELEMETRY_PATH: &str = "/api/battery-data";

/// Abstraction over anything that can produce telemetry snapshots
pub trait TelemetrySource: Send + Sync + 'static {
    /// Fetch one snapshot
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>> + Send;

    /// Short description for the status line and logs
    fn describe(&self) -> String;
}

/// Polls a backend over HTTP
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Create a source for the given endpoint URL
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("BatteryDash/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TelemetrySource for HttpSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let snapshot = Snapshot::from_json(&body)?;
        debug!(url = %self.url, "fetched telemetry snapshot");
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
