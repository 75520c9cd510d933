//! Runtime settings.
//!
//! Settings are layered from built-in defaults, an optional TOML file and
//! `AMWATCH_*` environment variables (nested keys use `__`, e.g.
//! `AMWATCH_PATHS__LIST`). Command-line flags are applied on top by the
//! binary.
//!
//! ```toml
//! endpoint = "http://ntopng:3000"
//! csrf = "d41d8cd98f00b204"
//! refresh_secs = 15
//!
//! [labels]
//! measurement = "Measurement"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::backend::client::{EDIT_PATH, IMPORT_PATH, LIST_PATH};
use crate::backend::EndpointPaths;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub list: String,
    pub edit: String,
    pub import: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            list: LIST_PATH.to_string(),
            edit: EDIT_PATH.to_string(),
            import: IMPORT_PATH.to_string(),
        }
    }
}

impl From<&PathSettings> for EndpointPaths {
    fn from(paths: &PathSettings) -> Self {
        EndpointPaths {
            list: paths.list.clone(),
            edit: paths.edit.clone(),
            import: paths.import.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend base URL.
    pub endpoint: String,
    pub paths: PathSettings,
    /// Token sent with add/edit/delete and the first import.
    pub csrf: String,
    /// Seconds between periodic reloads.
    pub refresh_secs: u64,
    /// Milliseconds a success notice stays visible.
    pub notice_ms: u64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Measurement registry JSON; the built-in set is used when unset.
    pub registry: Option<PathBuf>,
    /// Overrides for UI strings.
    pub labels: BTreeMap<String, String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000".to_string(),
            paths: PathSettings::default(),
            csrf: String::new(),
            refresh_secs: 15,
            notice_ms: 1000,
            timeout_secs: 10,
            registry: None,
            labels: BTreeMap::new(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (optional) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("AMWATCH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to read configuration")?;
        config
            .try_deserialize()
            .context("invalid configuration")
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
