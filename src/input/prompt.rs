//! Prompt collection and input parsing
//!
//! The time string must be well-formed, but out-of-range components
//! (e.g. `25:00:00`) are accepted here and normalize later during instant
//! computation. Rejecting them would break operators who rely on the
//! rollover.

use std::io::{self, BufRead, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Input errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No target time entered")]
    EmptyInput,

    #[error("Invalid time format '{0}'. Use HH:MM:SS.mmm (milliseconds optional)")]
    MalformedTime(String),

    #[error("Invalid delay '{0}'")]
    InvalidDelay(String),
}

/// Wall-clock time of day as entered by the operator.
///
/// Components are carried unvalidated; range overflow is resolved by the
/// schedule module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

/// Two-digit hour/minute/second, optional 1-3 digit fraction.
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2})(?:\.(\d{1,3}))?$").unwrap());

/// Parse a `HH:MM:SS` or `HH:MM:SS.mmm` target time string.
///
/// The fractional part is right-padded to three digits, so `.9` means 900 ms
/// and `.99` means 990 ms.
pub fn parse_target_time(input: &str) -> Result<TargetTime, InputError> {
    if input.is_empty() {
        return Err(InputError::EmptyInput);
    }

    let caps = TIME_PATTERN
        .captures(input)
        .ok_or_else(|| InputError::MalformedTime(input.to_string()))?;

    let field = |idx: usize| -> u32 {
        // Guarded by the pattern: 1-3 ASCII digits always fit in u32.
        caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };

    let millisecond = match caps.get(4) {
        Some(frac) => format!("{:0<3}", frac.as_str()).parse().unwrap_or(0),
        None => 0,
    };

    Ok(TargetTime {
        hour: field(1),
        minute: field(2),
        second: field(3),
        millisecond,
    })
}

/// Parse the extra post-target delay in milliseconds.
///
/// Empty input means the default of zero. Any numeric value is accepted,
/// including negative and fractional ones (fractions truncate); only
/// non-numeric input is an error.
pub fn parse_extra_delay(input: &str) -> Result<i64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidDelay(input.to_string()))?;
    if value.is_nan() {
        return Err(InputError::InvalidDelay(input.to_string()));
    }

    Ok(value as i64)
}

/// Show a prompt and read one line from stdin.
///
/// Returns `None` when stdin is closed (the console equivalent of a
/// cancelled prompt).
pub fn prompt(message: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Show a prompt with a default value; empty input returns the default.
pub fn prompt_with_default(message: &str, default: &str) -> io::Result<String> {
    let answer = prompt(&format!("{message} [{default}]"))?;
    Ok(match answer {
        Some(text) if !text.is_empty() => text,
        _ => default.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_time() {
        let t = parse_target_time("08:59:59.900").unwrap();
        assert_eq!(t.hour, 8);
        assert_eq!(t.minute, 59);
        assert_eq!(t.second, 59);
        assert_eq!(t.millisecond, 900);
    }

    #[test]
    fn test_parse_without_fraction() {
        let t = parse_target_time("23:00:05").unwrap();
        assert_eq!((t.hour, t.minute, t.second, t.millisecond), (23, 0, 5, 0));
    }

    #[test]
    fn test_fraction_right_pads_to_millis() {
        assert_eq!(parse_target_time("08:59:59.9").unwrap().millisecond, 900);
        assert_eq!(parse_target_time("08:59:59.99").unwrap().millisecond, 990);
        assert_eq!(parse_target_time("08:59:59.123").unwrap().millisecond, 123);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(parse_target_time(""), Err(InputError::EmptyInput)));
    }

    #[test]
    fn test_malformed_times_are_rejected() {
        for bad in [
            "8:59:59",       // single-digit hour
            "08:59",         // missing seconds
            "085959",        // no separators
            "08:59:59.1234", // fraction too long
            "08:59:59.",     // empty fraction
            "08:59:59 ",     // trailing junk
            "ab:cd:ef",
        ] {
            assert!(
                matches!(parse_target_time(bad), Err(InputError::MalformedTime(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_out_of_range_components_pass_through() {
        // Overflow is resolved later by instant computation, not here.
        let t = parse_target_time("25:61:00").unwrap();
        assert_eq!((t.hour, t.minute), (25, 61));
    }

    #[test]
    fn test_parse_extra_delay() {
        assert_eq!(parse_extra_delay("0").unwrap(), 0);
        assert_eq!(parse_extra_delay("250").unwrap(), 250);
        assert_eq!(parse_extra_delay("").unwrap(), 0);
        assert_eq!(parse_extra_delay("  ").unwrap(), 0);
        assert_eq!(parse_extra_delay("1.5").unwrap(), 1);
        assert_eq!(parse_extra_delay("-100").unwrap(), -100);
    }

    #[test]
    fn test_non_numeric_delay_is_rejected() {
        assert!(matches!(
            parse_extra_delay("abc"),
            Err(InputError::InvalidDelay(_))
        ));
        assert!(matches!(
            parse_extra_delay("NaN"),
            Err(InputError::InvalidDelay(_))
        ));
    }
}
