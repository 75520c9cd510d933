//! Transient per-dialog form state.

use thiserror::Error;

use super::synth::{synthesize, FieldPlan, GranularityHint, HostField};
use crate::registry::{Granularity, MeasurementRegistry};

/// Identity of the probe an edit dialog was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeIdentity {
    pub host: String,
    pub measurement: String,
    pub granularity: Option<String>,
}

/// Client-side validation failures. The dialog stays open on any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no measurement selected")]
    NoMeasurement,
    #[error("host is required")]
    MissingHost,
    #[error("threshold must be a non-negative number")]
    InvalidThreshold,
    #[error("threshold must not exceed {0}")]
    ThresholdTooHigh(f64),
    #[error("no granularity selected")]
    NoGranularity,
}

/// Field values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFields {
    pub measurement: String,
    pub host: String,
    pub threshold: f64,
    pub granularity: String,
}

/// Current contents of an add or edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeForm {
    /// Measurement keys offered by the selector, in display order.
    pub measurement_options: Vec<String>,
    pub measurement: String,
    pub host: String,
    pub host_locked: bool,
    /// Threshold as typed.
    pub threshold: String,
    pub threshold_max: Option<f64>,
    pub operator: String,
    pub unit: String,
    pub granularity_options: Vec<Granularity>,
    pub granularity: Option<String>,
    /// Set for edit forms; locates the record being replaced.
    pub original: Option<ProbeIdentity>,
}

impl ProbeForm {
    /// Apply a synthesized plan to the dependent fields.
    pub fn apply(&mut self, plan: FieldPlan) {
        self.measurement = plan.measurement;
        self.operator = plan.operator;
        self.unit = plan.unit;
        match plan.host {
            HostField::Locked(host) => {
                self.host = host;
                self.host_locked = true;
            }
            HostField::Editable => self.host_locked = false,
        }
        self.granularity_options = plan.granularities;
        self.granularity = plan.granularity;
        self.threshold_max = plan.threshold_max;
        if let Some(threshold) = plan.threshold {
            self.threshold = crate::data::format_number(threshold);
        }
    }

    /// Re-synthesize the dependent fields for the current measurement.
    ///
    /// The granularity selected before the rebuild is offered as the
    /// previous value. Returns `false` when the measurement is unresolved.
    pub fn refresh(
        &mut self,
        registry: &MeasurementRegistry,
        explicit_granularity: Option<&str>,
        apply_defaults: bool,
        default_unit: &str,
    ) -> bool {
        let hint = GranularityHint {
            explicit: explicit_granularity,
            previous: self.granularity.as_deref(),
        };
        match synthesize(registry, &self.measurement, hint, apply_defaults, default_unit) {
            Some(plan) => {
                self.apply(plan);
                true
            }
            None => false,
        }
    }

    /// Switch to another offered measurement and refresh dependent fields.
    pub fn select_measurement(
        &mut self,
        key: &str,
        registry: &MeasurementRegistry,
        default_unit: &str,
    ) -> bool {
        if !self.measurement_options.iter().any(|k| k == key) {
            return false;
        }
        self.measurement = key.to_string();
        self.refresh(registry, None, false, default_unit)
    }

    /// Move the measurement selector by `step` positions, wrapping around.
    pub fn cycle_measurement(
        &mut self,
        step: isize,
        registry: &MeasurementRegistry,
        default_unit: &str,
    ) -> bool {
        let current = self
            .measurement_options
            .iter()
            .position(|k| *k == self.measurement);
        let Some(next) = cycle_index(current, self.measurement_options.len(), step) else {
            return false;
        };
        let key = self.measurement_options[next].clone();
        self.select_measurement(&key, registry, default_unit)
    }

    /// Move the granularity selector by `step` positions, wrapping around.
    pub fn cycle_granularity(&mut self, step: isize) {
        let current = self
            .granularity_options
            .iter()
            .position(|g| Some(&g.value) == self.granularity.as_ref());
        if let Some(next) = cycle_index(current, self.granularity_options.len(), step) {
            self.granularity = Some(self.granularity_options[next].value.clone());
        }
    }

    /// Title of the selected granularity, for display.
    pub fn granularity_title(&self) -> Option<&str> {
        let selected = self.granularity.as_deref()?;
        self.granularity_options
            .iter()
            .find(|g| g.value == selected)
            .map(|g| g.title.as_str())
    }

    pub fn validate(&self) -> Result<ValidFields, ValidationError> {
        if self.measurement.is_empty() {
            return Err(ValidationError::NoMeasurement);
        }
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ValidationError::MissingHost);
        }
        let threshold: f64 = self
            .threshold
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidThreshold)?;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ValidationError::InvalidThreshold);
        }
        if let Some(max) = self.threshold_max {
            if threshold > max {
                return Err(ValidationError::ThresholdTooHigh(max));
            }
        }
        let granularity = self
            .granularity
            .clone()
            .ok_or(ValidationError::NoGranularity)?;

        Ok(ValidFields {
            measurement: self.measurement.clone(),
            host: host.to_string(),
            threshold,
            granularity,
        })
    }
}

fn cycle_index(current: Option<usize>, len: usize, step: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let base = current.map_or(if step >= 0 { -1 } else { 0 }, |i| i as isize);
    Some((base + step).rem_euclid(len) as usize)
}
