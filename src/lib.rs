//! Timed Trigger
//!
//! Fires a single element click at a precise wall-clock time. The operator
//! supplies a target time of day (milliseconds optional) and an extra delay;
//! the tool computes the next occurrence of that time, waits it out on the
//! event loop, then clicks one well-known element in the active browser
//! document.

pub mod input;
pub mod schedule;
pub mod trigger;
pub mod browser;

use std::path::PathBuf;

/// Identifier of the enrollment button this tool was built to click.
pub const DEFAULT_ELEMENT_ID: &str = "ctl00_contentPlaceHolder_ibEnroll";

/// Trigger configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    /// DOM id of the element to click at fire time
    pub element_id: String,
    /// Page to open after launch (operator navigates manually if unset)
    pub page_url: Option<String>,
    /// Path to Chrome/Chromium executable (auto-detected if unset)
    pub chrome_path: Option<String>,
    /// Run the browser in headless mode
    pub headless: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            page_url: None,
            chrome_path: None,
            // Head-full: the operator usually has to log in and reach the
            // right page while the timer counts down.
            headless: false,
        }
    }
}

/// Get log directory path (shared across modules)
pub fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timed-trigger").join("logs"))
}

/// Initialize logging: console output plus a daily-rolling log file when a
/// log directory is available.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "timed-trigger.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}
