//! # amwatch
//!
//! A terminal management panel for active monitoring probes.
//!
//! Probes periodically measure a host (ICMP, HTTP, throughput, speedtest...)
//! and raise an alert when the result crosses a threshold. This crate lists
//! the configured probes with a 24-hour health strip, filters them by
//! measurement and alert status, and adds, edits or deletes them through the
//! backend's plugin endpoints.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│  table   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │ filters  │    │         │    │          │  │
//! │  └──┬───┬──┘    └──────────┘    └─────────┘    └──────────┘  │
//! │     │   │                                                    │
//! │     │   └──▶ dialog ──▶ form (synth, gatekeeper) ──▶ registry │
//! │     ▼                                                        │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── HttpSource | FileSource                      │
//! │  │ backend │◀── BackendClient, Submitter                     │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`registry`]**: measurement descriptors (operators, units, granularities)
//! - **[`form`]**: field synthesis and the exclusive-measurement rule
//! - **[`filter`]**: counted filter menus that relabel in place on reload
//! - **[`heatmap`]**: layout of the 24-hour status strip
//! - **[`dialog`]**: add/edit/delete dialogs with ticketed submissions
//! - **[`source`]** / **[`backend`]**: reload sequencing and the HTTP API
//!
//! ## Usage
//!
//! ```bash
//! # Talk to a running backend
//! amwatch --endpoint http://ntopng:3000 --config amwatch.toml
//!
//! # Browse a captured probe list offline
//! amwatch --file probes.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use amwatch::{App, FileSource, Labels, MeasurementRegistry, OfflineSubmitter};
//!
//! let source = Box::new(FileSource::new("probes.json"));
//! let app = App::new(
//!     source,
//!     Box::new(OfflineSubmitter::new()),
//!     MeasurementRegistry::builtin(),
//!     Labels::default(),
//! );
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod data;
pub mod dialog;
pub mod events;
pub mod filter;
pub mod form;
pub mod heatmap;
pub mod i18n;
pub mod notice;
pub mod registry;
pub mod source;
pub mod table;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use backend::{
    BackendClient, BackendError, HttpSubmitter, OfflineSubmitter, ProbeRequest, Submitter,
};
pub use config::Settings;
pub use data::{HourStatus, ProbeRow, ProbeSnapshot};
pub use dialog::{Dialog, DialogKind, DialogPhase};
pub use filter::FilterMenu;
pub use form::ProbeForm;
pub use i18n::Labels;
pub use notice::Notice;
pub use registry::{MeasurementDescriptor, MeasurementRegistry};
pub use source::{FileSource, HttpSource, ProbeSource};
pub use table::{Column, ProbeTable, TableApi};
