//! Request and response payloads of the probe endpoints.

use serde::{Deserialize, Serialize, Serializer};

/// A probe mutation, tagged by `action` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ProbeRequest {
    Add {
        am_host: String,
        #[serde(serialize_with = "serialize_threshold")]
        threshold: f64,
        measurement: String,
        granularity: String,
    },
    Edit {
        am_host: String,
        #[serde(serialize_with = "serialize_threshold")]
        threshold: f64,
        measurement: String,
        granularity: String,
        old_am_host: String,
        old_measurement: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old_granularity: Option<String>,
    },
    Delete {
        am_host: String,
        measurement: String,
    },
}

impl ProbeRequest {
    pub fn action(&self) -> &'static str {
        match self {
            ProbeRequest::Add { .. } => "add",
            ProbeRequest::Edit { .. } => "edit",
            ProbeRequest::Delete { .. } => "delete",
        }
    }

    /// `(host, measurement)` the request writes to.
    pub fn target(&self) -> (&str, &str) {
        match self {
            ProbeRequest::Add {
                am_host,
                measurement,
                ..
            }
            | ProbeRequest::Edit {
                am_host,
                measurement,
                ..
            }
            | ProbeRequest::Delete {
                am_host,
                measurement,
            } => (am_host.as_str(), measurement.as_str()),
        }
    }
}

/// Request body with the CSRF token attached.
#[derive(Debug, Serialize)]
pub(crate) struct Signed<'a, T: Serialize> {
    #[serde(flatten)]
    pub body: &'a T,
    pub csrf: &'a str,
}

/// Response of the mutate endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the configuration import endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    /// Token to use for the next import.
    #[serde(default)]
    pub csrf: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Whole thresholds go out as integers, everything else as floats.
fn serialize_threshold<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        if *value >= 0.0 {
            serializer.serialize_u64(*value as u64)
        } else {
            serializer.serialize_i64(*value as i64)
        }
    } else {
        serializer.serialize_f64(*value)
    }
}
