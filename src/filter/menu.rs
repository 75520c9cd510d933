//! Dropdown filter menus over a table column.
//!
//! A menu is built once from a list of [`FilterEntry`] values and keeps an
//! explicit `active` key. Rendering reads the menu state; nothing is encoded
//! in the view. When the dataset is reloaded the entry labels are patched in
//! place with [`FilterMenu::relabel`] so the active selection survives.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::table::{Column, TableApi};

/// Key of the synthetic entry that clears the column search.
pub const ALL_KEY: &str = "all";

/// A labeled predicate over one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    /// Stable identifier used for relabeling.
    pub key: String,
    /// Display label, usually carrying a live count.
    pub label: String,
    /// Regex applied to the column's filter text.
    pub regex: String,
}

impl FilterEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            regex: regex.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown filter entry: {0}")]
    UnknownEntry(String),
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// One row of a rendered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FilterMenu {
    title: String,
    all_label: String,
    column: Column,
    entries: Vec<FilterEntry>,
    active: Option<String>,
}

impl FilterMenu {
    /// Build a menu. Entries are ordered by label.
    pub fn new(
        title: impl Into<String>,
        all_label: impl Into<String>,
        column: Column,
        mut entries: Vec<FilterEntry>,
    ) -> Self {
        entries.sort_by(|a, b| compare_labels(&a.label, &b.label));
        Self {
            title: title.into(),
            all_label: all_label.into(),
            column,
            entries,
            active: None,
        }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a filter is applied (the filter icon is shown).
    pub fn is_filtering(&self) -> bool {
        self.active.is_some()
    }

    /// Title shown on the dropdown button: the active entry's current label,
    /// or the menu title when nothing is selected.
    pub fn display_title(&self) -> &str {
        self.active
            .as_deref()
            .and_then(|key| self.entries.iter().find(|e| e.key == key))
            .map_or(self.title.as_str(), |e| e.label.as_str())
    }

    /// Menu rows with the synthetic "all" row first.
    pub fn items(&self) -> Vec<MenuItem<'_>> {
        let mut items = vec![MenuItem {
            key: ALL_KEY,
            label: &self.all_label,
            active: false,
        }];
        items.extend(self.entries.iter().map(|e| MenuItem {
            key: &e.key,
            label: &e.label,
            active: self.active.as_deref() == Some(e.key.as_str()),
        }));
        items
    }

    /// Apply the entry's regex to the column and mark it active.
    ///
    /// Selecting [`ALL_KEY`] behaves like [`FilterMenu::select_all`].
    pub fn select(&mut self, key: &str, table: &mut impl TableApi) -> Result<(), FilterError> {
        if key == ALL_KEY {
            self.select_all(table);
            return Ok(());
        }
        let entry = self
            .entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| FilterError::UnknownEntry(key.to_string()))?;

        table.search_column(self.column, &entry.regex)?;
        debug!(menu = %self.title, key, "filter selected");
        self.active = Some(key.to_string());
        Ok(())
    }

    /// Clear the column search and the active marker.
    pub fn select_all(&mut self, table: &mut impl TableApi) {
        table.clear_column(self.column);
        self.active = None;
    }

    /// Replace labels of the entries named in `labels`.
    ///
    /// Keys not in the menu are ignored; the menu structure and the active
    /// selection are untouched. Returns how many labels changed.
    pub fn relabel(&mut self, labels: &BTreeMap<String, String>) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            if let Some(label) = labels.get(&entry.key) {
                if *label != entry.label {
                    entry.label = label.clone();
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// Case-insensitive label ordering with an exact-text tie-break.
fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProbeRow;
    use crate::table::ProbeTable;

    fn table() -> ProbeTable {
        let mut table = ProbeTable::new();
        table.replace_rows(vec![
            ProbeRow::new("icmp", "1.1.1.1"),
            ProbeRow::new("icmp", "8.8.8.8"),
            ProbeRow::new("http", "example.com"),
        ]);
        table
    }

    fn menu() -> FilterMenu {
        FilterMenu::new(
            "Measurement",
            "All",
            Column::Url,
            vec![
                FilterEntry::new("icmp", "ICMP (2)", "^(icmp://).+"),
                FilterEntry::new("http", "HTTP (1)", "^(http://).+"),
            ],
        )
    }

    #[test]
    fn test_entries_sorted_by_label() {
        let m = menu();
        let keys: Vec<&str> = m.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["http", "icmp"]);
    }

    #[test]
    fn test_label_order_ignores_case() {
        let m = FilterMenu::new(
            "t",
            "All",
            Column::Url,
            vec![FilterEntry::new("b", "beta", "b"), FilterEntry::new("a", "Alpha", "a")],
        );
        assert_eq!(m.entries()[0].key, "a");
    }

    #[test]
    fn test_select_applies_column_search() {
        let mut t = table();
        let mut m = menu();
        m.select("icmp", &mut t).unwrap();

        assert_eq!(m.active_key(), Some("icmp"));
        assert_eq!(m.display_title(), "ICMP (2)");
        assert!(m.is_filtering());
        assert_eq!(t.column_search(Column::Url), Some("^(icmp://).+"));
        assert_eq!(t.visible_rows().len(), 2);
    }

    #[test]
    fn test_reselect_is_idempotent() {
        let mut t = table();
        let mut m = menu();
        m.select("http", &mut t).unwrap();
        m.select("http", &mut t).unwrap();
        assert_eq!(m.active_key(), Some("http"));
        assert_eq!(t.visible_rows().len(), 1);
    }

    #[test]
    fn test_select_all_twice_same_as_once() {
        let mut t = table();
        let mut m = menu();
        m.select("icmp", &mut t).unwrap();

        m.select_all(&mut t);
        let once = (m.active_key().map(String::from), t.column_search(Column::Url).map(String::from));
        m.select(ALL_KEY, &mut t).unwrap();
        let twice = (m.active_key().map(String::from), t.column_search(Column::Url).map(String::from));

        assert_eq!(once, (None, None));
        assert_eq!(once, twice);
        assert_eq!(m.display_title(), "Measurement");
        assert!(!m.is_filtering());
        assert_eq!(t.visible_rows().len(), 3);
    }

    #[test]
    fn test_unknown_entry() {
        let mut t = table();
        let mut m = menu();
        let err = m.select("dns", &mut t).unwrap_err();
        assert!(matches!(err, FilterError::UnknownEntry(_)));
        assert!(m.active_key().is_none());
    }

    #[test]
    fn test_relabel_only_changes_named_entry() {
        let mut t = table();
        let mut m = menu();
        m.select("http", &mut t).unwrap();

        let mut labels = BTreeMap::new();
        labels.insert("icmp".to_string(), "ICMP (4)".to_string());
        labels.insert("http".to_string(), "HTTP (1)".to_string());
        labels.insert("dns".to_string(), "DNS (1)".to_string());

        assert_eq!(m.relabel(&labels), 1);
        assert_eq!(m.entries()[1].label, "ICMP (4)");
        assert_eq!(m.entries()[0].label, "HTTP (1)");
        assert_eq!(m.active_key(), Some("http"));
        assert_eq!(m.entries().len(), 2);
    }

    #[test]
    fn test_relabel_updates_active_title() {
        let mut t = table();
        let mut m = menu();
        m.select("icmp", &mut t).unwrap();

        let mut labels = BTreeMap::new();
        labels.insert("icmp".to_string(), "ICMP (3)".to_string());
        m.relabel(&labels);
        assert_eq!(m.display_title(), "ICMP (3)");
    }

    #[test]
    fn test_items_start_with_all() {
        let mut t = table();
        let mut m = menu();
        m.select("icmp", &mut t).unwrap();
        let items = m.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].key, ALL_KEY);
        assert!(!items[0].active);
        assert!(items[2].active);
    }
}
