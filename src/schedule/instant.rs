//! Scheduled-instant computation
//!
//! The candidate instant is built by adding the entered components to local
//! midnight as plain durations. That reproduces the permissive wraparound
//! the tool has always had: minute 61 rolls into the next hour, hour 25
//! into tomorrow. If the candidate is not strictly in the future it advances
//! by one calendar day, same time of day.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::info;

use crate::input::TargetTime;

/// Fixed, sortable timestamp format used for every logged instant.
pub fn format_timestamp(instant: &NaiveDateTime) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// The computed wait: when "now" was sampled, the instant to fire at, and
/// the two delays derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPlan {
    /// Moment the plan was computed (sampled exactly once)
    pub now: NaiveDateTime,
    /// Scheduled instant, today or tomorrow
    pub target: NaiveDateTime,
    /// Milliseconds from `now` to `target`, always >= 0
    pub ms_until_target: i64,
    /// Extra delay applied after the target instant is reached
    pub extra_delay_ms: i64,
}

impl WaitPlan {
    /// Combine the target time of day with `now`, rolling to the next
    /// calendar day when the instant has already passed.
    pub fn compute(now: NaiveDateTime, time: &TargetTime, extra_delay_ms: i64) -> Self {
        let midnight = NaiveDateTime::new(now.date(), NaiveTime::MIN);
        let offset = Duration::hours(i64::from(time.hour))
            + Duration::minutes(i64::from(time.minute))
            + Duration::seconds(i64::from(time.second))
            + Duration::milliseconds(i64::from(time.millisecond));

        let mut target = midnight + offset;
        if target <= now {
            target += Duration::days(1);
        }

        Self {
            now,
            target,
            ms_until_target: (target - now).num_milliseconds(),
            extra_delay_ms,
        }
    }

    /// Total nominal wait from plan computation to the click.
    pub fn total_wait_ms(&self) -> i64 {
        self.ms_until_target + self.extra_delay_ms
    }

    /// Sleep duration for the first (target) wait.
    pub fn target_sleep(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.ms_until_target.max(0) as u64)
    }

    /// Sleep duration for the second (extra-delay) wait. Negative delays
    /// clamp to zero, matching timer-queue semantics.
    pub fn extra_sleep(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.extra_delay_ms.max(0) as u64)
    }

    /// Log the plan in the fixed timestamp format.
    pub fn log_summary(&self) {
        info!("Current time: {}", format_timestamp(&self.now));
        info!("Target time:  {}", format_timestamp(&self.target));
        info!("Milliseconds until target: {}", self.ms_until_target);
        info!("Extra delay (ms): {}", self.extra_delay_ms);
        info!("Total wait (ms): {}", self.total_wait_ms());
    }
}
