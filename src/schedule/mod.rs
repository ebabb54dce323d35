//! Scheduling module
//!
//! Turns a target time of day into the absolute instant to fire at.

mod instant;

pub use instant::{format_timestamp, WaitPlan};
