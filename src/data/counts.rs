//! Aggregate counts over the current probe list.

use std::collections::BTreeMap;

use super::probe::ProbeRow;

/// Filter key for probes currently in alert.
pub const ALERTED: &str = "alerted";
/// Filter key for probes not in alert.
pub const NOT_ALERTED: &str = "not_alerted";

/// Count rows grouped by the key returned from `key_fn`.
pub fn count_by<'a, K, F>(rows: impl IntoIterator<Item = &'a ProbeRow>, key_fn: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&'a ProbeRow) -> K,
{
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(key_fn(row)).or_insert(0) += 1;
    }
    counts
}

/// Number of probes per measurement key.
pub fn measurement_counts(rows: &[ProbeRow]) -> BTreeMap<String, usize> {
    count_by(rows, |row| row.measurement.clone())
}

/// Number of alerted and not-alerted probes. Both keys are always present.
pub fn alert_counts(rows: &[ProbeRow]) -> BTreeMap<String, usize> {
    let mut counts = count_by(rows, |row| {
        let key = if row.alerted { ALERTED } else { NOT_ALERTED };
        key.to_string()
    });
    counts.entry(ALERTED.to_string()).or_insert(0);
    counts.entry(NOT_ALERTED.to_string()).or_insert(0);
    counts
}
