//! Access to the monitoring backend.
//!
//! - [`client`]: the HTTP client for listing, mutating and importing probes
//! - [`request`]: wire payloads
//! - [`submit`]: fire-and-poll submission used by the dialogs

pub mod client;
mod error;
pub mod request;
pub mod submit;

pub use client::{BackendClient, BackendClientBuilder, EndpointPaths, ImportSession};
pub use error::BackendError;
pub use request::{ImportResponse, MutationResponse, ProbeRequest};
pub use submit::{Completion, HttpSubmitter, OfflineSubmitter, Submitter, Ticket};
