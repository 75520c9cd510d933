//! Exclusive measurement gating.
//!
//! Measurements with a forced host may only be configured once. Once a probe
//! of such a measurement exists, its key is "claimed" and is no longer
//! offered when creating probes.

use std::collections::BTreeSet;

use crate::data::ProbeRow;
use crate::registry::MeasurementRegistry;

/// Keys of exclusive measurements already present in `rows`.
pub fn claimed_measurements<'a>(
    rows: &'a [ProbeRow],
    registry: &MeasurementRegistry,
) -> BTreeSet<&'a str> {
    rows.iter()
        .filter(|row| {
            registry
                .get(&row.measurement)
                .is_some_and(|d| d.is_exclusive())
        })
        .map(|row| row.measurement.as_str())
        .collect()
}

/// Measurement keys a dialog may offer, ordered by label.
///
/// Every unclaimed key is offered. `keep_selected` is offered even when
/// claimed so an edit dialog still lists the probe's own measurement.
pub fn available_options(
    rows: &[ProbeRow],
    registry: &MeasurementRegistry,
    keep_selected: Option<&str>,
) -> Vec<String> {
    let claimed = claimed_measurements(rows, registry);

    let mut options: Vec<(&str, &str)> = registry
        .iter()
        .filter(|d| Some(d.key.as_str()) == keep_selected || !claimed.contains(d.key.as_str()))
        .map(|d| (d.label.as_str(), d.key.as_str()))
        .collect();
    options.sort();

    options.into_iter().map(|(_, key)| key.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Granularity, MeasurementDescriptor};

    fn descriptor(key: &str, label: &str, force_host: Option<&str>) -> MeasurementDescriptor {
        MeasurementDescriptor {
            key: key.into(),
            label: label.into(),
            operator: None,
            unit: None,
            granularities: vec![Granularity::new("min", "1 Minute")],
            force_host: force_host.map(String::from),
            max_threshold: None,
            default_threshold: None,
        }
    }

    fn registry() -> MeasurementRegistry {
        MeasurementRegistry::new([
            descriptor("icmp", "ICMP", None),
            descriptor("http", "HTTP", Some("0.0.0.0")),
            descriptor("a_last", "Zeta", None),
            descriptor("z_first", "Alpha", None),
        ])
    }

    #[test]
    fn test_options_sorted_by_label_not_key() {
        let options = available_options(&[], &registry(), None);
        assert_eq!(options, vec!["z_first", "http", "icmp", "a_last"]);
    }

    #[test]
    fn test_claimed_exclusive_hidden_for_add() {
        let rows = vec![ProbeRow::new("http", "0.0.0.0")];
        let options = available_options(&rows, &registry(), None);
        assert!(!options.contains(&"http".to_string()));
        assert!(options.contains(&"icmp".to_string()));
    }

    #[test]
    fn test_claimed_exclusive_kept_for_its_own_edit() {
        let rows = vec![ProbeRow::new("http", "0.0.0.0")];
        let options = available_options(&rows, &registry(), Some("http"));
        assert!(options.contains(&"http".to_string()));
    }

    #[test]
    fn test_non_exclusive_never_claimed() {
        let rows = vec![ProbeRow::new("icmp", "1.1.1.1"), ProbeRow::new("icmp", "8.8.8.8")];
        assert!(claimed_measurements(&rows, &registry()).is_empty());
        assert_eq!(available_options(&rows, &registry(), None).len(), 4);
    }

    #[test]
    fn test_rows_with_unknown_measurement_are_ignored() {
        let rows = vec![ProbeRow::new("dns", "1.1.1.1")];
        assert!(claimed_measurements(&rows, &registry()).is_empty());
    }
}
