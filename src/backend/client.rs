//! HTTP client for the active monitoring plugin endpoints.
//!
//! ## Example
//!
//! ```rust,no_run
//! use amwatch::backend::BackendClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::builder()
//!         .endpoint("http://localhost:3000")
//!         .csrf("d41d8cd98f00b204")
//!         .build();
//!
//!     let probes = client.list_probes().await?;
//!     println!("{} probes configured", probes.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::request::{ImportResponse, MutationResponse, ProbeRequest, Signed};
use super::BackendError;
use crate::data::ProbeRow;

/// Default path of the probe list endpoint.
pub const LIST_PATH: &str = "/plugins/get_active_monitoring_hosts.lua";
/// Default path of the add/edit/delete endpoint.
pub const EDIT_PATH: &str = "/plugins/edit_active_monitoring_host.lua";
/// Default path of the configuration import endpoint.
pub const IMPORT_PATH: &str = "/plugins/import_active_monitoring_config.lua";

/// Endpoint paths relative to the backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    pub list: String,
    pub edit: String,
    pub import: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            list: LIST_PATH.to_string(),
            edit: EDIT_PATH.to_string(),
            import: IMPORT_PATH.to_string(),
        }
    }
}

/// Client for the probe list, mutation and import endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    endpoint: String,
    paths: EndpointPaths,
    csrf: String,
}

impl BackendClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> BackendClientBuilder {
        BackendClientBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Fetch the full probe list.
    pub async fn list_probes(&self) -> Result<Vec<ProbeRow>, BackendError> {
        let response = self.client.get(self.url(&self.paths.list)).send().await?;
        let rows: Vec<ProbeRow> = decode(response).await?;
        debug!(count = rows.len(), "probe list fetched");
        Ok(rows)
    }

    /// Send an add, edit or delete request.
    pub async fn mutate(&self, request: &ProbeRequest) -> Result<MutationResponse, BackendError> {
        let (host, measurement) = request.target();
        info!(action = request.action(), host, measurement, "submitting probe change");

        let body = Signed {
            body: request,
            csrf: &self.csrf,
        };
        let response = self
            .client
            .post(self.url(&self.paths.edit))
            .json(&body)
            .send()
            .await?;
        let result: MutationResponse = decode(response).await?;
        if !result.success {
            warn!(action = request.action(), message = ?result.message, "probe change rejected");
        }
        Ok(result)
    }

    /// Upload a configuration blob using the given import token.
    pub async fn import_config(
        &self,
        json: &str,
        csrf: &str,
    ) -> Result<ImportResponse, BackendError> {
        let response = self
            .client
            .post(self.url(&self.paths.import))
            .form(&[("csrf", csrf), ("JSON", json)])
            .send()
            .await?;
        decode(response).await
    }
}

/// Import helper that rotates the CSRF token after every import.
#[derive(Debug, Clone)]
pub struct ImportSession {
    client: BackendClient,
    csrf: String,
}

impl ImportSession {
    pub fn new(client: BackendClient, csrf: impl Into<String>) -> Self {
        Self {
            client,
            csrf: csrf.into(),
        }
    }

    /// Token that will be sent with the next import.
    pub fn csrf(&self) -> &str {
        &self.csrf
    }

    pub async fn import(&mut self, json: &str) -> Result<ImportResponse, BackendError> {
        let response = self.client.import_config(json, &self.csrf).await?;
        if let Some(next) = &response.csrf {
            self.csrf = next.clone();
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BackendError::Auth(format!("backend returned status {}", status)));
    }
    if !status.is_success() {
        return Err(BackendError::Http(format!("backend returned status {}", status)));
    }
    response
        .json()
        .await
        .map_err(|e| BackendError::Parse(e.to_string()))
}

/// Builder for BackendClient.
#[derive(Debug, Default)]
pub struct BackendClientBuilder {
    endpoint: Option<String>,
    csrf: Option<String>,
    paths: Option<EndpointPaths>,
    timeout: Option<Duration>,
}

impl BackendClientBuilder {
    /// Set the backend base URL (default: http://localhost:3000).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the CSRF token sent with mutations.
    pub fn csrf(mut self, csrf: impl Into<String>) -> Self {
        self.csrf = Some(csrf.into());
        self
    }

    pub fn paths(mut self, paths: EndpointPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> BackendClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        BackendClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            paths: self.paths.unwrap_or_default(),
            csrf: self.csrf.unwrap_or_default(),
        }
    }
}
