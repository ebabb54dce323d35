//! Timed Trigger CLI
//!
//! Collects the target time and extra delay, computes the wait, launches the
//! browser, and fires the click once the chained timers elapse. Every input
//! failure ends the run with a log line; nothing is retried.

use anyhow::Result;
use chrono::Local;
use tracing::{error, info};

use timed_trigger::browser::DomDocument;
use timed_trigger::input;
use timed_trigger::schedule::WaitPlan;
use timed_trigger::trigger;
use timed_trigger::TriggerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = timed_trigger::init_logging();

    info!("Starting Timed Trigger");
    if let Some(dir) = timed_trigger::log_dir() {
        info!("Log files saved to: {}", dir.display());
    }

    let config = TriggerConfig::default();

    let raw_target =
        match input::prompt("Enter target time (24h, include milliseconds), e.g. 08:59:59.900")? {
            Some(text) => text,
            None => {
                info!("No target time entered. Aborting.");
                return Ok(());
            }
        };
    let target = match input::parse_target_time(&raw_target) {
        Ok(time) => time,
        Err(e) => {
            info!("{e}. Aborting.");
            return Ok(());
        }
    };

    let raw_delay = input::prompt_with_default("Extra delay AFTER hitting time (ms)", "0")?;
    let extra_delay = match input::parse_extra_delay(&raw_delay) {
        Ok(ms) => ms,
        Err(e) => {
            info!("{e}. Aborting.");
            return Ok(());
        }
    };

    // "Now" is sampled exactly once; everything downstream derives from it.
    let plan = WaitPlan::compute(Local::now().naive_local(), &target, extra_delay);
    plan.log_summary();

    let document = match DomDocument::launch(&config).await {
        Ok(document) => document,
        Err(e) => {
            error!("{e}. Aborting.");
            return Ok(());
        }
    };

    if let Err(e) = trigger::run_chain(&plan, &document, &config.element_id).await {
        error!("Trigger run failed: {e:#}");
    }

    info!("Run complete - press Ctrl+C to close the browser and exit");
    let _ = tokio::signal::ctrl_c().await;
    document.close().await;

    Ok(())
}
