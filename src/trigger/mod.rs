//! Trigger module
//!
//! The two-stage timer chain and the document seam it fires against.

mod chain;

pub use chain::{run_chain, Activation, TargetDocument, TriggerState};
