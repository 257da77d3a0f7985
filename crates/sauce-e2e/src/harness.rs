//! Per-scenario session setup and teardown.
//!
//! Each scenario gets its own Chrome process and tab. [`run_scenario`]
//! launches them, hands the tab to the scenario, and closes the browser
//! afterwards no matter how the scenario ended: success, error, or panic.
//! A leaked Chrome per failed scenario would otherwise pile up across a run.

use crate::browser::TestBrowser;
use crate::config::E2eConfig;
use crate::error::Result;
use crate::page::Page;
use futures::FutureExt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, resume_unwind};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runs `scenario` in a fresh browser session built from `config`.
///
/// The browser is closed before this returns or re-raises a panic. When
/// `config.artifacts_dir` is set and the scenario fails, a screenshot of the
/// page is saved there as `<name>.png` first.
///
/// ```ignore
/// let config = E2eConfig::load(None)?;
/// let target = config.target();
/// run_scenario(&config, "cart/add-remove", |page| async move {
///     scenarios::add_remove_cart(&page, &target).await
/// })
/// .await?;
/// ```
///
/// # Errors
///
/// Returns the scenario's error, or a launch/close error if the scenario
/// itself succeeded.
pub async fn run_scenario<T, F, Fut>(config: &E2eConfig, name: &str, scenario: F) -> Result<T>
where
    F: FnOnce(Page) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    info!(scenario = name, "starting session");
    let browser = TestBrowser::launch(config.browser_config()).await?;

    let outcome = match browser.new_page().await {
        Ok(page) => {
            let outcome = AssertUnwindSafe(scenario(page.clone()))
                .catch_unwind()
                .await;

            let failed = !matches!(outcome, Ok(Ok(_)));
            if let (true, Some(dir)) = (failed, &config.artifacts_dir) {
                match save_screenshot(&page, dir, name).await {
                    Ok(path) => info!(path = %path.display(), "saved failure screenshot"),
                    Err(e) => warn!("could not save failure screenshot: {e}"),
                }
            }
            outcome
        }
        Err(e) => Ok(Err(e)),
    };

    let closed = browser.close().await;
    info!(scenario = name, "session closed");

    match outcome {
        Err(panic) => {
            if let Err(e) = closed {
                warn!("browser close failed while unwinding: {e}");
            }
            resume_unwind(panic)
        }
        Ok(Err(e)) => {
            if let Err(close_err) = closed {
                warn!("browser close failed after scenario error: {close_err}");
            }
            Err(e)
        }
        Ok(Ok(value)) => closed.map(|()| value),
    }
}

/// File name used for a scenario's failure screenshot.
#[must_use]
pub fn screenshot_file_name(scenario: &str) -> String {
    let stem: String = scenario
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{stem}.png")
}

async fn save_screenshot(page: &Page, dir: &Path, scenario: &str) -> Result<PathBuf> {
    let png = page.screenshot().await?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(screenshot_file_name(scenario));
    tokio::fs::write(&path, png).await?;
    Ok(path)
}
