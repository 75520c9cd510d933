//! Filter menus over the probe table.
//!
//! - [`menu`]: the generic [`FilterMenu`] (entries, "all" entry, active key,
//!   in-place relabeling)
//! - [`builders`]: the measurement and alert-status menus with live counts

pub mod builders;
pub mod menu;

pub use builders::{alert_labels, alert_menu, measurement_labels, measurement_menu, measurement_regex};
pub use menu::{FilterEntry, FilterError, FilterMenu, MenuItem, ALL_KEY};
