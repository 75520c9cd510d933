//! Measurement registry.
//!
//! The registry maps a measurement key (e.g. `"icmp"`) to the descriptor that
//! shapes every form built for that measurement: its unit, comparison
//! operator, the sampling intervals it supports and, for exclusive
//! measurements, the host it is pinned to.
//!
//! The registry is loaded once at startup and treated as constant afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Comparison operator used when none is declared.
pub const DEFAULT_OPERATOR: &str = "gt";

/// A selectable sampling interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Granularity {
    /// Wire value sent to the backend (e.g. `"min"`).
    pub value: String,
    /// Human readable title shown in the selector.
    pub title: String,
}

impl Granularity {
    pub fn new(value: &str, title: &str) -> Self {
        Self {
            value: value.to_string(),
            title: title.to_string(),
        }
    }
}

/// Static description of one measurement type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDescriptor {
    /// Unique key. Filled from the map key when loading a registry file.
    #[serde(default)]
    pub key: String,
    pub label: String,
    /// Comparison glyph name (`gt`, `lt`, ...). `None` means [`DEFAULT_OPERATOR`].
    #[serde(default)]
    pub operator: Option<String>,
    /// Display unit. `None` means the default time unit label.
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub granularities: Vec<Granularity>,
    /// Fixed host. When set, at most one probe of this measurement may exist.
    #[serde(default, alias = "forceHost")]
    pub force_host: Option<String>,
    #[serde(default, alias = "maxThreshold")]
    pub max_threshold: Option<f64>,
    /// Seed value applied only when a probe is being created.
    #[serde(default, alias = "defaultThreshold")]
    pub default_threshold: Option<f64>,
}

impl MeasurementDescriptor {
    /// Returns the operator glyph name, falling back to `gt`.
    pub fn operator(&self) -> &str {
        self.operator.as_deref().unwrap_or(DEFAULT_OPERATOR)
    }

    /// Whether this measurement is pinned to a single host.
    pub fn is_exclusive(&self) -> bool {
        self.force_host.is_some()
    }
}

/// Lookup table from measurement key to descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementRegistry {
    descriptors: BTreeMap<String, MeasurementDescriptor>,
}

impl MeasurementRegistry {
    /// Build a registry from a list of descriptors. Later duplicates win.
    pub fn new(descriptors: impl IntoIterator<Item = MeasurementDescriptor>) -> Self {
        Self {
            descriptors: descriptors.into_iter().map(|d| (d.key.clone(), d)).collect(),
        }
    }

    /// Load a registry from a JSON file shaped as `{ "<key>": { descriptor } }`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid registry {}", path.display()))
    }

    /// Parse a registry from its JSON representation.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, MeasurementDescriptor> = serde_json::from_str(content)?;
        Ok(Self::new(raw.into_iter().map(|(key, mut descriptor)| {
            descriptor.key = key;
            descriptor
        })))
    }

    pub fn get(&self, key: &str) -> Option<&MeasurementDescriptor> {
        self.descriptors.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.descriptors.contains_key(key)
    }

    /// Display label of a measurement, if known.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(|d| d.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeasurementDescriptor> {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The measurement set shipped with the backend plugin.
    pub fn builtin() -> Self {
        let fine = || {
            vec![
                Granularity::new("min", "1 Minute"),
                Granularity::new("5mins", "5 Minutes"),
                Granularity::new("hour", "Hourly"),
            ]
        };
        let coarse = || vec![Granularity::new("hour", "Hourly"), Granularity::new("day", "Daily")];

        Self::new([
            MeasurementDescriptor {
                key: "icmp".into(),
                label: "ICMP".into(),
                operator: None,
                unit: None,
                granularities: fine(),
                force_host: None,
                max_threshold: None,
                default_threshold: None,
            },
            MeasurementDescriptor {
                key: "icmp6".into(),
                label: "ICMPv6".into(),
                operator: None,
                unit: None,
                granularities: fine(),
                force_host: None,
                max_threshold: None,
                default_threshold: None,
            },
            MeasurementDescriptor {
                key: "cicmp".into(),
                label: "Continuous ICMP".into(),
                operator: Some("gt".into()),
                unit: Some("%".into()),
                granularities: vec![
                    Granularity::new("min", "1 Minute"),
                    Granularity::new("5mins", "5 Minutes"),
                ],
                force_host: None,
                max_threshold: Some(100.0),
                default_threshold: Some(10.0),
            },
            MeasurementDescriptor {
                key: "http".into(),
                label: "HTTP".into(),
                operator: None,
                unit: None,
                granularities: fine(),
                force_host: None,
                max_threshold: None,
                default_threshold: None,
            },
            MeasurementDescriptor {
                key: "https".into(),
                label: "HTTPS".into(),
                operator: None,
                unit: None,
                granularities: fine(),
                force_host: None,
                max_threshold: None,
                default_threshold: None,
            },
            MeasurementDescriptor {
                key: "throughput".into(),
                label: "Throughput".into(),
                operator: Some("lt".into()),
                unit: Some("Mbit/s".into()),
                granularities: vec![
                    Granularity::new("5mins", "5 Minutes"),
                    Granularity::new("hour", "Hourly"),
                ],
                force_host: None,
                max_threshold: None,
                default_threshold: Some(10.0),
            },
            MeasurementDescriptor {
                key: "speedtest".into(),
                label: "Speedtest".into(),
                operator: Some("lt".into()),
                unit: Some("Mbit/s".into()),
                granularities: coarse(),
                force_host: Some("speedtest.net".into()),
                max_threshold: Some(10_000.0),
                default_threshold: Some(10.0),
            },
        ])
    }
}
