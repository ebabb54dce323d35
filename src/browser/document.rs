//! Browser-backed target document
//!
//! Launches a Chrome/Chromium instance over the DevTools Protocol and
//! exposes the one operation the trigger needs: resolve an element by id in
//! the active page and click it. The lookup runs as a self-contained script
//! inside the page, so "click" here is the element's own click behavior,
//! not a synthesized mouse event.

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, info, warn};

use super::BrowserError;
use crate::trigger::{Activation, TargetDocument};
use crate::TriggerConfig;

/// Find a Chrome/Chromium executable on the system
fn find_chrome() -> Option<std::path::PathBuf> {
    let candidates: Vec<std::path::PathBuf> = if cfg!(target_os = "windows") {
        let mut paths = vec![
            std::path::PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            std::path::PathBuf::from(
                r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            ),
        ];
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            paths.push(std::path::PathBuf::from(format!(
                r"{}\Google\Chrome\Application\chrome.exe",
                local
            )));
        }
        paths
    } else if cfg!(target_os = "macos") {
        vec![std::path::PathBuf::from(
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        )]
    } else {
        vec![
            std::path::PathBuf::from("/usr/bin/google-chrome"),
            std::path::PathBuf::from("/usr/bin/google-chrome-stable"),
            std::path::PathBuf::from("/usr/bin/chromium"),
            std::path::PathBuf::from("/usr/bin/chromium-browser"),
        ]
    };

    candidates.into_iter().find(|p| p.exists())
}

/// Build the in-page lookup-and-click script for an element id.
fn lookup_script(element_id: &str) -> String {
    // The id lands inside a single-quoted JS string literal.
    let escaped = element_id.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        r#"
        (function() {{
            const el = document.getElementById('{escaped}');
            if (el) {{
                el.click();
                return true;
            }}
            return false;
        }})()
        "#
    )
}

/// A live browser page that the trigger can fire into.
pub struct DomDocument {
    browser: Browser,
    page: Page,
}

impl DomDocument {
    /// Launch the browser and open the starting page.
    ///
    /// The operator is free to log in and navigate inside the launched
    /// window while the timers count down; the click always runs against
    /// whatever the page holds at fire time.
    pub async fn launch(config: &TriggerConfig) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder().window_size(1280, 900);

        if config.headless {
            // New headless mode; with_head() keeps chromiumoxide from adding
            // the legacy --headless flag on top of it.
            builder = builder.with_head().arg("--headless=new");
        } else {
            builder = builder.with_head();
        }

        let chrome_path = config
            .chrome_path
            .clone()
            .map(std::path::PathBuf::from)
            .or_else(find_chrome);
        if let Some(ref path) = chrome_path {
            info!("Using browser executable: {}", path.display());
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(BrowserError::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        // Drive the CDP event loop for the lifetime of the browser.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let start_url = config.page_url.as_deref().unwrap_or("about:blank");
        let page = browser
            .new_page(start_url)
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

        info!("Browser ready on {}", start_url);
        Ok(Self { browser, page })
    }

    /// Close the browser and wait for the process to exit.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {e}");
        }
        let _ = self.browser.wait().await;
    }
}

#[async_trait]
impl TargetDocument for DomDocument {
    async fn activate(&self, element_id: &str) -> Result<Activation> {
        debug!("Looking up element '{element_id}' in the active page");
        let result = self
            .page
            .evaluate(lookup_script(element_id))
            .await
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        let clicked = result.into_value::<bool>().unwrap_or(false);
        Ok(if clicked {
            Activation::Clicked
        } else {
            Activation::NotFound
        })
    }
}
