//! Probe data models and aggregation.
//!
//! ## Submodules
//!
//! - [`probe`]: [`ProbeRow`] as delivered by the backend and the per-hour
//!   [`HourStatus`] codes
//! - [`snapshot`]: whole-dataset [`ProbeSnapshot`]s and the reload [`Sequencer`]
//! - [`counts`]: per-measurement and per-alert-status counts feeding the
//!   filter menus
//!
//! ## Data Flow
//!
//! ```text
//! GET probe list (JSON)
//!        │
//!        ▼
//! ProbeSnapshot { sequence, rows }
//!        │
//!        ├──▶ Sequencer::accept() (stale responses dropped)
//!        │
//!        └──▶ counts ──▶ FilterMenu::relabel()
//! ```

pub mod counts;
pub mod probe;
pub mod snapshot;

pub use counts::{alert_counts, count_by, measurement_counts, ALERTED, NOT_ALERTED};
pub use probe::{format_number, HourStatus, ProbeRow, HOURS_PER_DAY};
pub use snapshot::{ProbeSnapshot, Sequencer};
