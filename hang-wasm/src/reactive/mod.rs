//! A minimal reactive layer used to wire the broadcast orchestrator's inputs
//! (enabled/connection/name) to its outputs (status/catalog) without manual
//! callback plumbing at every call site.

mod effect;
mod signal;

pub use effect::*;
pub use signal::*;
