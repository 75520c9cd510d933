//! Probe rows as delivered by the backend list endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of hourly slots in the health heatmap.
pub const HOURS_PER_DAY: usize = 24;

/// Health of a probe during one hour of the last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HourStatus {
    NoData,
    Ok,
    Alert,
    Warning,
}

impl HourStatus {
    /// Decode a wire code. Unknown codes are treated as missing data.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => HourStatus::Ok,
            2 => HourStatus::Alert,
            3 => HourStatus::Warning,
            _ => HourStatus::NoData,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            HourStatus::NoData => 0,
            HourStatus::Ok => 1,
            HourStatus::Alert => 2,
            HourStatus::Warning => 3,
        }
    }
}

/// One configured probe.
///
/// `host` and `measurement` together identify the probe on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeRow {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub measurement: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub granularity: Option<String>,
    /// The backend sends this as `0`/`1` as often as a real boolean.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub alerted: bool,
    #[serde(default, deserialize_with = "lenient_number")]
    pub last_measure: Option<f64>,
    #[serde(default)]
    pub last_ip: Option<String>,
    #[serde(default, rename = "last_mesurement_time", alias = "last_measurement_time")]
    pub last_measurement_time: Option<String>,
    /// Per-hour status codes for the last 24 hours (may be empty).
    #[serde(default)]
    pub hours: Vec<u8>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub jitter: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    /// `<measurement>://<host>` identity shown in the first column.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub chart: Option<String>,
}

impl ProbeRow {
    /// Convenience constructor used by tests and the file source.
    pub fn new(measurement: &str, host: &str) -> Self {
        Self {
            host: host.to_string(),
            measurement: measurement.to_string(),
            url: format!("{}://{}", measurement, host),
            ..Self::default()
        }
    }

    /// Fill in `url` from host and measurement when the backend left it out.
    pub fn ensure_url(&mut self) {
        if self.url.is_empty() {
            self.url = format!("{}://{}", self.measurement, self.host);
        }
    }

    /// Status for the given hour slot; missing slots read as no data.
    pub fn hour_status(&self, hour: usize) -> HourStatus {
        self.hours
            .get(hour)
            .copied()
            .map_or(HourStatus::NoData, HourStatus::from_code)
    }
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Accept numbers, numeric strings, empty strings and null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Flag(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Flag(_)) | None => None,
    })
}

/// Accept booleans, numbers, numeric strings and null. Non-zero is true.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Flag(b)) => b,
        Some(Raw::Number(n)) => n != 0.0,
        Some(Raw::Text(s)) => match s.trim() {
            "true" => true,
            other => other.parse::<f64>().is_ok_and(|n| n != 0.0),
        },
        None => false,
    })
}
