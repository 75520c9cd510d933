//! Display label lookup.
//!
//! Labels are an opaque key → text dictionary. Built-in English defaults can
//! be overridden from the `[labels]` table of the configuration file.

use std::collections::BTreeMap;

const DEFAULTS: &[(&str, &str)] = &[
    ("all", "All"),
    ("alert_status", "Alert Status"),
    ("alerted", "Alerted"),
    ("not_alerted", "Not Alerted"),
    ("measurement", "Measurement"),
    ("msec", "ms"),
    ("search", "Search"),
    ("edit", "Edit"),
    ("delete", "Delete"),
    ("add", "Add"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    entries: BTreeMap<String, String>,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            entries: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Labels {
    /// Defaults with the given overrides applied on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut labels = Self::default();
        labels
            .entries
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        labels
    }

    /// Look up a label. Unknown keys render as the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_fallback() {
        let labels = Labels::default();
        assert_eq!(labels.get("alerted"), "Alerted");
        assert_eq!(labels.get("no_such_label"), "no_such_label");
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert("msec".to_string(), "msec".to_string());
        let labels = Labels::with_overrides(&overrides);
        assert_eq!(labels.get("msec"), "msec");
        assert_eq!(labels.get("all"), "All");
    }
}
