//! Measurement-dependent field synthesis.
//!
//! Given the measurement chosen in a dialog, [`synthesize`] computes the
//! complete shape of the dependent fields: operator, unit, host lock,
//! granularity options and selection, and threshold bounds.

use crate::registry::{Granularity, MeasurementRegistry};

/// State of the host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostField {
    /// Host is user-editable; the current value is left untouched.
    Editable,
    /// Host is pinned to this value and cannot be edited.
    Locked(String),
}

/// Granularity selection inputs.
///
/// `explicit` is a value the caller wants selected (e.g. the stored
/// granularity of the probe being edited). `previous` is what the selector
/// held before its options were rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GranularityHint<'a> {
    pub explicit: Option<&'a str>,
    pub previous: Option<&'a str>,
}

impl<'a> GranularityHint<'a> {
    pub fn explicit(value: &'a str) -> Self {
        Self {
            explicit: Some(value),
            previous: None,
        }
    }

    pub fn previous(value: Option<&'a str>) -> Self {
        Self {
            explicit: None,
            previous: value,
        }
    }
}

/// Fully resolved dependent-field state for one measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    pub measurement: String,
    /// Operator glyph name, e.g. `gt`.
    pub operator: String,
    pub unit: String,
    pub host: HostField,
    pub granularities: Vec<Granularity>,
    /// Selected granularity value. `None` only when there are no options.
    pub granularity: Option<String>,
    /// Upper bound for the threshold input.
    pub threshold_max: Option<f64>,
    /// Threshold to seed into the form, set only when defaults were requested.
    pub threshold: Option<f64>,
}

impl FieldPlan {
    pub fn operator_symbol(&self) -> String {
        operator_symbol(&self.operator)
    }
}

/// Compute the dependent fields for `measurement`.
///
/// Returns `None` when the key is empty or unknown so callers can leave the
/// form as is while the selector is still unresolved.
pub fn synthesize(
    registry: &MeasurementRegistry,
    measurement: &str,
    hint: GranularityHint<'_>,
    apply_defaults: bool,
    default_unit: &str,
) -> Option<FieldPlan> {
    if measurement.is_empty() {
        return None;
    }
    let descriptor = registry.get(measurement)?;

    let host = match &descriptor.force_host {
        Some(forced) => HostField::Locked(forced.clone()),
        None => HostField::Editable,
    };

    let granularities = descriptor.granularities.clone();
    let granularity = select_granularity(&granularities, hint);

    Some(FieldPlan {
        measurement: descriptor.key.clone(),
        operator: descriptor.operator().to_string(),
        unit: descriptor
            .unit
            .clone()
            .unwrap_or_else(|| default_unit.to_string()),
        host,
        granularities,
        granularity,
        threshold_max: descriptor.max_threshold,
        threshold: if apply_defaults {
            descriptor.default_threshold
        } else {
            None
        },
    })
}

/// Explicit value first, then the previous selection if still offered,
/// then the first option.
fn select_granularity(options: &[Granularity], hint: GranularityHint<'_>) -> Option<String> {
    let offered = |value: &str| options.iter().any(|g| g.value == value);

    hint.explicit
        .filter(|&v| offered(v))
        .or_else(|| hint.previous.filter(|&v| offered(v)))
        .map(str::to_string)
        .or_else(|| options.first().map(|g| g.value.clone()))
}

/// Display symbol for an operator glyph name.
pub fn operator_symbol(name: &str) -> String {
    match name {
        "gt" => ">",
        "lt" => "<",
        "ge" | "gte" => "≥",
        "le" | "lte" => "≤",
        "eq" | "equals" => "=",
        other => other,
    }
    .to_string()
}
