//! Browser lifecycle management and process control.
//!
//! `TestBrowser` owns one Chrome process. Scenarios get exactly one browser
//! each; nothing here is shared between scenarios.
//!
//! # Resource Safety
//!
//! `TestBrowser` relies on chromiumoxide's Drop to kill the Chrome process if
//! a test panics before `close()`. Explicit `close()` is still preferred, and
//! [`crate::harness::run_scenario`] always calls it.

use crate::error::{E2eError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a test browser.
#[derive(Debug, Clone)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true unless the `visible` feature is on).
    pub headless: bool,

    /// Start with the window maximized (default: true).
    pub maximize: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<String>,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Chrome command-line arguments, excluding the per-launch profile dir.
    fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.headless {
            args.push("--headless".to_string());
        }
        if self.maximize {
            args.push("--start-maximized".to_string());
        }
        args.push(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));
        args.extend(self.args.iter().cloned());
        args
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        for arg in self.chrome_args() {
            config = config.arg(arg);
        }

        // Parallel test threads each launch Chrome; a unique profile dir keeps
        // them from colliding on Chrome's process singleton lock.
        let user_data_dir =
            std::env::temp_dir().join(format!("sauce-e2e-{}", uuid::Uuid::new_v4()));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| E2eError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: !cfg!(feature = "visible"),
            maximize: true,
            window_size: (1920, 1080),
            args: vec![
                // CI containers run without user namespaces
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed browser instance.
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.goto("https://www.saucedemo.com/").await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable,
    /// or fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!(
            headless = config.headless,
            width = config.window_size.0,
            height = config.window_size.1,
            "launching chrome"
        );

        let (browser, mut handler) = Browser::launch(config.to_browser_config()?)
            .await
            .map_err(|e| E2eError::LaunchFailed {
                reason: "chrome did not start".to_string(),
                source: Some(Box::new(e)),
            })?;

        // CDP events are only processed while the handler is polled
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("cdp handler: {e}");
                }
            }
        });

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Opens a new tab on `about:blank`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let guard = self.inner.lock().await;
        let tab = guard
            .as_ref()
            .ok_or(E2eError::AlreadyClosed)?
            .new_page("about:blank")
            .await
            .map_err(|e| E2eError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(tab))
    }

    /// Closes the browser and waits for the Chrome process to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(&self) -> Result<()> {
        let Some(mut browser) = self.inner.lock().await.take() else {
            return Ok(());
        };

        debug!("closing chrome");
        browser
            .close()
            .await
            .map_err(|e| E2eError::ConnectionFailed(e.to_string()))?;
        if let Err(e) = browser.wait().await {
            warn!("chrome did not exit cleanly: {e}");
        }
        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("browser dropped without close(); chrome is killed on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_args_are_headless_and_maximized() {
        let config = TestBrowserConfig {
            headless: true,
            ..TestBrowserConfig::default()
        };
        let args = config.chrome_args();

        assert_eq!(args[0], "--headless");
        assert!(args.contains(&"--start-maximized".to_string()));
        assert!(args.contains(&"--window-size=1920,1080".to_string()));
        assert!(args.contains(&"--no-sandbox".to_string()));
    }

    #[test]
    fn visible_and_sized_config() {
        let config = TestBrowserConfig::new()
            .visible()
            .with_window_size(800, 600)
            .with_args(vec!["--lang=en-US".to_string()]);
        let args = config.chrome_args();

        assert!(!args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--window-size=800,600".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--lang=en-US"));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close() {
        let browser = TestBrowser::launch(TestBrowserConfig::default())
            .await
            .expect("failed to launch browser");

        assert!(!browser.is_closed().await);

        browser.close().await.expect("failed to close browser");
        assert!(browser.is_closed().await);
    }
}
