//! Two-stage timer chain
//!
//! One run walks Idle -> WaitingForTarget -> WaitingForExtraDelay -> Fired.
//! The second wait is only registered after the first elapses, so the delays
//! are strictly sequential. Both waits are one-shot `tokio::time::sleep`
//! calls; a zero extra delay still crosses the timer queue instead of
//! running inline. Timers are best-effort, so the actual fire moment can lag
//! the nominal target by scheduler jitter; no correction is attempted.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info};

use crate::schedule::{format_timestamp, WaitPlan};

/// Phases of a single trigger run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    WaitingForTarget,
    WaitingForExtraDelay,
    Fired,
}

/// Outcome of asking the document to click the target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Element was present and its click behavior was invoked
    Clicked,
    /// Element was absent at fire time; nothing was clicked
    NotFound,
}

/// The one external collaborator: a document that can resolve an element by
/// id and invoke its click behavior.
#[async_trait]
pub trait TargetDocument {
    async fn activate(&self, element_id: &str) -> Result<Activation>;
}

/// Wait out the plan, then fire the click exactly once.
///
/// There is no retry and no cancellation surface; dropping the future (or
/// tearing the process down) is the only way to stop a pending run.
pub async fn run_chain<D>(plan: &WaitPlan, document: &D, element_id: &str) -> Result<Activation>
where
    D: TargetDocument + Sync,
{
    let mut state = TriggerState::Idle;

    state = transition(state, TriggerState::WaitingForTarget);
    tokio::time::sleep(plan.target_sleep()).await;

    info!(
        "Target time reached: {} -> waiting extra delay...",
        format_timestamp(&Local::now().naive_local())
    );

    state = transition(state, TriggerState::WaitingForExtraDelay);
    tokio::time::sleep(plan.extra_sleep()).await;

    transition(state, TriggerState::Fired);
    let outcome = document.activate(element_id).await?;
    match outcome {
        Activation::Clicked => {
            info!(
                "Click at {}",
                format_timestamp(&Local::now().naive_local())
            );
        }
        Activation::NotFound => {
            info!("Element '{element_id}' not found at click time");
        }
    }

    Ok(outcome)
}

fn transition(from: TriggerState, to: TriggerState) -> TriggerState {
    debug!("trigger state: {from:?} -> {to:?}");
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TargetTime;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    struct MockDocument {
        outcome: Activation,
        activations: AtomicUsize,
    }

    impl MockDocument {
        fn new(outcome: Activation) -> Self {
            Self {
                outcome,
                activations: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TargetDocument for MockDocument {
        async fn activate(&self, _element_id: &str) -> Result<Activation> {
            self.activations.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome)
        }
    }

    struct FailingDocument;

    #[async_trait]
    impl TargetDocument for FailingDocument {
        async fn activate(&self, _element_id: &str) -> Result<Activation> {
            anyhow::bail!("tab crashed")
        }
    }

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn plan(ms_until_target_from_now: (u32, u32, u32, u32), extra_delay_ms: i64) -> WaitPlan {
        let (h, m, s, ms) = ms_until_target_from_now;
        WaitPlan::compute(
            fixed_now(),
            &TargetTime {
                hour: h,
                minute: m,
                second: s,
                millisecond: ms,
            },
            extra_delay_ms,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_chain_waits_both_delays_in_sequence() {
        // 1500 ms to target plus a 250 ms extra delay.
        let plan = plan((8, 0, 1, 500), 250);
        let document = MockDocument::new(Activation::Clicked);

        let start = Instant::now();
        let outcome = run_chain(&plan, &document, "enroll").await.unwrap();

        assert_eq!(outcome, Activation::Clicked);
        assert_eq!(start.elapsed(), Duration::from_millis(1750));
        assert_eq!(document.activations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_extra_delay_still_fires() {
        let plan = plan((8, 0, 1, 500), 0);
        let document = MockDocument::new(Activation::Clicked);

        let start = Instant::now();
        run_chain(&plan, &document, "enroll").await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(1500));
        assert_eq!(document.activations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_element_is_a_normal_outcome() {
        let plan = plan((8, 0, 0, 100), 0);
        let document = MockDocument::new(Activation::NotFound);

        let outcome = run_chain(&plan, &document, "enroll").await.unwrap();

        assert_eq!(outcome, Activation::NotFound);
        assert_eq!(document.activations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_document_error_propagates() {
        let plan = plan((8, 0, 0, 100), 0);
        assert!(run_chain(&plan, &FailingDocument, "enroll").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_delay_clamps_but_still_yields() {
        let plan = plan((8, 0, 1, 0), -500);
        let document = MockDocument::new(Activation::Clicked);

        let start = Instant::now();
        run_chain(&plan, &document, "enroll").await.unwrap();

        // Only the target wait contributes; the clamped delay adds nothing.
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }
}
