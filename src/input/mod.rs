//! Operator input
//!
//! Interactive collection and validation of the target time and extra delay.

mod prompt;

pub use prompt::{
    parse_extra_delay, parse_target_time, prompt, prompt_with_default, InputError, TargetTime,
};
