//! Probe list sources.
//!
//! A source produces whole [`ProbeSnapshot`]s on request. The app asks for a
//! reload on a timer and after every successful submission, then polls
//! without blocking.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use crate::data::ProbeSnapshot;

/// Trait for loading the probe list from some backend.
///
/// # Example
///
/// ```
/// use amwatch::{FileSource, ProbeSource};
///
/// let mut source = FileSource::new("probes.json");
/// source.request_reload();
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} probes", snapshot.rows.len());
/// }
/// ```
pub trait ProbeSource: Send + Debug {
    /// Start loading a fresh probe list.
    ///
    /// Overlapping reloads are allowed; only the newest result is delivered.
    fn request_reload(&mut self);

    /// Latest completed snapshot, if one arrived since the last poll.
    ///
    /// This method must not block.
    fn poll(&mut self) -> Option<ProbeSnapshot>;

    /// Human-readable description shown in the status bar.
    fn description(&self) -> &str;

    /// Error from the most recent failed reload.
    fn error(&self) -> Option<&str>;
}
