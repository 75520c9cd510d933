//! In-memory probe table.
//!
//! Holds the current dataset and the searches applied to it. Filter menus
//! talk to the table only through [`TableApi`], which mirrors what a tabular
//! widget exposes: global search, per-column regex search, and access to the
//! full dataset.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use crate::data::{format_number, ProbeRow};

/// Table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Url,
    Chart,
    Threshold,
    Hours,
    LastMeasurementTime,
    LastIp,
    LastMeasure,
    /// Hidden column holding `1`/`0` for the alert status.
    Alerted,
    Jitter,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Url,
        Column::Chart,
        Column::Threshold,
        Column::Hours,
        Column::LastMeasurementTime,
        Column::LastIp,
        Column::LastMeasure,
        Column::Alerted,
        Column::Jitter,
    ];

    pub fn index(self) -> usize {
        Column::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Url => "Probe",
            Column::Chart => "Chart",
            Column::Threshold => "Threshold",
            Column::Hours => "Last 24h",
            Column::LastMeasurementTime => "Last Measurement",
            Column::LastIp => "Last IP",
            Column::LastMeasure => "Last Value",
            Column::Alerted => "Alerted",
            Column::Jitter => "Jitter",
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Column::Alerted)
    }

    /// Whether global search looks at this column.
    pub fn is_searchable(self) -> bool {
        !matches!(self, Column::Hours | Column::Chart)
    }

    /// Textual representation of `row` used for filtering and display.
    pub fn filter_text(self, row: &ProbeRow) -> String {
        let with_unit = |value: Option<f64>| match value {
            Some(v) => match row.unit.as_deref() {
                Some(unit) if !unit.is_empty() => format!("{} {}", format_number(v), unit),
                _ => format_number(v),
            },
            None => String::new(),
        };

        match self {
            Column::Url => row.url.clone(),
            Column::Chart => row.chart.clone().unwrap_or_default(),
            Column::Threshold => with_unit(row.threshold),
            Column::Hours => String::new(),
            Column::LastMeasurementTime => row.last_measurement_time.clone().unwrap_or_default(),
            Column::LastIp => row.last_ip.clone().unwrap_or_default(),
            Column::LastMeasure => with_unit(row.last_measure),
            Column::Alerted => String::from(if row.alerted { "1" } else { "0" }),
            Column::Jitter => row.jitter.map(format_number).unwrap_or_default(),
        }
    }
}

/// Operations filter menus and the app need from the table.
pub trait TableApi {
    /// Free-text search over all searchable columns. Empty clears it.
    fn search(&mut self, text: &str);

    /// Apply a regex (not smart search) to one column.
    fn search_column(&mut self, column: Column, pattern: &str) -> Result<(), regex::Error>;

    /// Remove the search on one column.
    fn clear_column(&mut self, column: Column);

    /// The full current dataset, ignoring searches.
    fn rows(&self) -> &[ProbeRow];

    /// Replace the dataset wholesale. Searches stay in effect.
    fn replace_rows(&mut self, rows: Vec<ProbeRow>);
}

#[derive(Debug, Default)]
pub struct ProbeTable {
    rows: Vec<ProbeRow>,
    global_search: String,
    column_searches: BTreeMap<Column, Regex>,
}

impl ProbeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global_search(&self) -> &str {
        &self.global_search
    }

    /// Pattern currently applied to `column`, if any.
    pub fn column_search(&self, column: Column) -> Option<&str> {
        self.column_searches.get(&column).map(Regex::as_str)
    }

    /// Rows passing every active search, in dataset order.
    pub fn visible_rows(&self) -> Vec<&ProbeRow> {
        let terms: Vec<String> = self
            .global_search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.rows
            .iter()
            .filter(|row| {
                self.column_searches
                    .iter()
                    .all(|(column, re)| re.is_match(&column.filter_text(row)))
            })
            .filter(|row| terms.is_empty() || matches_terms(row, &terms))
            .collect()
    }
}

fn matches_terms(row: &ProbeRow, terms: &[String]) -> bool {
    let haystack = Column::ALL
        .iter()
        .filter(|c| c.is_searchable())
        .map(|c| c.filter_text(row).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    terms.iter().all(|t| haystack.contains(t.as_str()))
}

impl TableApi for ProbeTable {
    fn search(&mut self, text: &str) {
        self.global_search = text.to_string();
    }

    fn search_column(&mut self, column: Column, pattern: &str) -> Result<(), regex::Error> {
        let re = Regex::new(pattern)?;
        debug!(column = column.title(), pattern, "column search applied");
        self.column_searches.insert(column, re);
        Ok(())
    }

    fn clear_column(&mut self, column: Column) {
        if self.column_searches.remove(&column).is_some() {
            debug!(column = column.title(), "column search cleared");
        }
    }

    fn rows(&self) -> &[ProbeRow] {
        &self.rows
    }

    fn replace_rows(&mut self, rows: Vec<ProbeRow>) {
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ProbeTable {
        let mut alerted = ProbeRow::new("icmp", "8.8.8.8");
        alerted.alerted = true;
        alerted.threshold = Some(100.0);
        alerted.unit = Some("ms".into());

        let mut table = ProbeTable::new();
        table.replace_rows(vec![
            alerted,
            ProbeRow::new("icmp", "1.1.1.1"),
            ProbeRow::new("http", "example.com"),
            ProbeRow::new("https", "example.org"),
        ]);
        table
    }

    #[test]
    fn test_filter_text() {
        let t = table();
        let row = &t.rows()[0];
        assert_eq!(Column::Url.filter_text(row), "icmp://8.8.8.8");
        assert_eq!(Column::Threshold.filter_text(row), "100 ms");
        assert_eq!(Column::Alerted.filter_text(row), "1");
        assert_eq!(Column::Alerted.filter_text(&t.rows()[1]), "0");
    }

    #[test]
    fn test_column_regex_search() {
        let mut t = table();
        t.search_column(Column::Url, "^(http://).+").unwrap();
        let visible = t.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].host, "example.com");
    }

    #[test]
    fn test_alert_column_search_is_exact() {
        let mut t = table();
        t.search_column(Column::Alerted, "^1$").unwrap();
        assert_eq!(t.visible_rows().len(), 1);

        t.clear_column(Column::Alerted);
        assert_eq!(t.visible_rows().len(), 4);
        assert!(t.column_search(Column::Alerted).is_none());
    }

    #[test]
    fn test_global_search_all_terms() {
        let mut t = table();
        t.search("EXAMPLE org");
        let visible = t.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].measurement, "https");

        t.search("");
        assert_eq!(t.visible_rows().len(), 4);
    }

    #[test]
    fn test_searches_survive_reload() {
        let mut t = table();
        t.search_column(Column::Url, "^(icmp://).+").unwrap();
        t.replace_rows(vec![ProbeRow::new("icmp", "9.9.9.9"), ProbeRow::new("http", "a")]);
        assert_eq!(t.visible_rows().len(), 1);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut t = table();
        assert!(t.search_column(Column::Url, "(").is_err());
        assert!(t.column_search(Column::Url).is_none());
    }

    #[test]
    fn test_column_indices() {
        assert_eq!(Column::Url.index(), 0);
        assert_eq!(Column::Alerted.index(), 7);
        assert!(!Column::Alerted.is_visible());
    }
}
