//! Probe form engine.
//!
//! - [`synth`]: derives measurement-dependent field state ([`FieldPlan`])
//!   from the registry
//! - [`gatekeeper`]: hides exclusive measurements that are already configured
//! - [`state`]: the mutable [`ProbeForm`] behind an add or edit dialog

pub mod gatekeeper;
pub mod state;
pub mod synth;

pub use gatekeeper::{available_options, claimed_measurements};
pub use state::{ProbeForm, ProbeIdentity, ValidFields, ValidationError};
pub use synth::{operator_symbol, synthesize, FieldPlan, GranularityHint, HostField};
