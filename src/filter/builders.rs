//! Counted filter menus for the probe table.
//!
//! Two menus are built at first load: one per measurement type present in
//! the data (matched on the `<key>://` prefix of the url column) and one for
//! the alert status (exact `1`/`0` on the hidden alert column). Each reload
//! recomputes the counts and relabels the existing entries.

use std::collections::BTreeMap;

use super::menu::{FilterEntry, FilterMenu};
use crate::data::{alert_counts, measurement_counts, ProbeRow, ALERTED, NOT_ALERTED};
use crate::i18n::Labels;
use crate::registry::MeasurementRegistry;
use crate::table::Column;

/// Regex selecting rows whose url uses the measurement's scheme.
pub fn measurement_regex(key: &str) -> String {
    format!("^({}://).+", regex::escape(key))
}

fn alert_regex(key: &str) -> &'static str {
    if key == ALERTED {
        "^1$"
    } else {
        "^0$"
    }
}

fn counted(label: &str, count: usize) -> String {
    format!("{} ({})", label, count)
}

fn measurement_label(registry: &MeasurementRegistry, key: &str, count: usize) -> String {
    counted(registry.label(key).unwrap_or(key), count)
}

/// Build the measurement menu from the measurements present in `rows`.
pub fn measurement_menu(
    rows: &[ProbeRow],
    registry: &MeasurementRegistry,
    labels: &Labels,
) -> FilterMenu {
    let entries = measurement_counts(rows)
        .into_iter()
        .map(|(key, count)| {
            FilterEntry::new(
                key.clone(),
                measurement_label(registry, &key, count),
                measurement_regex(&key),
            )
        })
        .collect();

    FilterMenu::new(labels.get("measurement"), labels.get("all"), Column::Url, entries)
}

/// Fresh labels for every entry of a measurement menu.
///
/// Entries whose measurement disappeared from the data read `(0)`.
pub fn measurement_labels(
    menu: &FilterMenu,
    rows: &[ProbeRow],
    registry: &MeasurementRegistry,
) -> BTreeMap<String, String> {
    let counts = measurement_counts(rows);
    menu.entries()
        .iter()
        .map(|e| {
            let count = counts.get(&e.key).copied().unwrap_or(0);
            (e.key.clone(), measurement_label(registry, &e.key, count))
        })
        .collect()
}

/// Build the alert-status menu.
pub fn alert_menu(rows: &[ProbeRow], labels: &Labels) -> FilterMenu {
    let entries = alert_labels(rows, labels)
        .into_iter()
        .map(|(key, label)| {
            let regex = alert_regex(&key);
            FilterEntry::new(key, label, regex)
        })
        .collect();

    FilterMenu::new(labels.get("alert_status"), labels.get("all"), Column::Alerted, entries)
}

/// Fresh labels for both alert-status entries.
pub fn alert_labels(rows: &[ProbeRow], labels: &Labels) -> BTreeMap<String, String> {
    let counts = alert_counts(rows);
    [ALERTED, NOT_ALERTED]
        .into_iter()
        .map(|key| {
            let count = counts.get(key).copied().unwrap_or(0);
            (key.to_string(), counted(labels.get(key), count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::menu::ALL_KEY;
    use crate::table::{ProbeTable, TableApi};

    fn rows(measurements: &[&str]) -> Vec<ProbeRow> {
        measurements
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let mut row = ProbeRow::new(m, &format!("host{}", i));
                row.alerted = i % 2 == 0;
                row
            })
            .collect()
    }

    #[test]
    fn test_measurement_menu_counts() {
        let data = rows(&["icmp", "icmp", "http", "icmp", "http"]);
        let menu = measurement_menu(&data, &MeasurementRegistry::builtin(), &Labels::default());

        let labels: Vec<&str> = menu.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["HTTP (2)", "ICMP (3)"]);
        assert_eq!(menu.entries()[1].regex, "^(icmp://).+");
        assert_eq!(menu.column(), Column::Url);
        assert_eq!(menu.display_title(), "Measurement");
    }

    #[test]
    fn test_unknown_measurement_uses_key_as_label() {
        let data = rows(&["dns"]);
        let menu = measurement_menu(&data, &MeasurementRegistry::builtin(), &Labels::default());
        assert_eq!(menu.entries()[0].label, "dns (1)");
    }

    #[test]
    fn test_relabel_after_reload_changes_only_icmp() {
        let registry = MeasurementRegistry::builtin();
        let mut table = ProbeTable::new();
        let before = rows(&["icmp", "icmp", "icmp", "http", "http"]);
        table.replace_rows(before.clone());

        let mut menu = measurement_menu(&before, &registry, &Labels::default());
        menu.select("http", &mut table).unwrap();

        let after = rows(&["icmp", "icmp", "icmp", "icmp", "http", "http"]);
        let changed = menu.relabel(&measurement_labels(&menu, &after, &registry));

        assert_eq!(changed, 1);
        assert_eq!(menu.entries()[0].label, "HTTP (2)");
        assert_eq!(menu.entries()[1].label, "ICMP (4)");
        assert_eq!(menu.active_key(), Some("http"));
        assert_eq!(menu.display_title(), "HTTP (2)");
    }

    #[test]
    fn test_vanished_measurement_reads_zero() {
        let registry = MeasurementRegistry::builtin();
        let before = rows(&["icmp", "http"]);
        let mut menu = measurement_menu(&before, &registry, &Labels::default());

        menu.relabel(&measurement_labels(&menu, &rows(&["icmp"]), &registry));
        assert_eq!(menu.entries()[0].label, "HTTP (0)");
        assert_eq!(menu.entries().len(), 2);
    }

    #[test]
    fn test_alert_menu_filters_hidden_column() {
        let data = rows(&["icmp", "icmp", "http"]);
        let mut table = ProbeTable::new();
        table.replace_rows(data.clone());

        let mut menu = alert_menu(&data, &Labels::default());
        let labels: Vec<&str> = menu.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Alerted (2)", "Not Alerted (1)"]);

        menu.select(NOT_ALERTED, &mut table).unwrap();
        assert_eq!(table.column_search(Column::Alerted), Some("^0$"));
        assert_eq!(table.visible_rows().len(), 1);

        menu.select(ALL_KEY, &mut table).unwrap();
        assert_eq!(table.visible_rows().len(), 3);
        assert_eq!(table.rows().len(), 3);
    }

    #[test]
    fn test_measurement_regex_escapes_key() {
        assert_eq!(measurement_regex("a.b"), "^(a\\.b://).+");
    }
}
