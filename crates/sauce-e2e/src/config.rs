//! Suite configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults (the public demo site, 10 s waits, headless Chrome)
//! 2. `sauce-e2e.toml` in the working directory, or an explicit file
//! 3. `SAUCE_E2E_*` environment variables (`SAUCE_E2E_BASE_URL`,
//!    `SAUCE_E2E_HEADLESS`, ...)
//!
//! The CLI applies its flags on top of the loaded value.

use crate::browser::TestBrowserConfig;
use crate::error::{E2eError, Result};
use crate::target::{SAUCE_DEMO_URL, TargetApp};
use crate::wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "sauce-e2e.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SAUCE_E2E_";

/// Everything a run needs to know about the target and the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct E2eConfig {
    /// Root URL of the storefront.
    pub base_url: String,
    /// Bounded wait for element lookups, in milliseconds.
    pub wait_timeout_ms: u64,
    /// Poll interval of the bounded wait, in milliseconds.
    pub poll_interval_ms: u64,
    /// Run Chrome without a window.
    pub headless: bool,
    /// Start Chrome maximized.
    pub maximize: bool,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Chrome executable; auto-detected when unset.
    pub chrome_path: Option<String>,
    /// Where failure screenshots go; none are taken when unset.
    pub artifacts_dir: Option<PathBuf>,
}

impl Default for E2eConfig {
    fn default() -> Self {
        let browser = TestBrowserConfig::default();
        Self {
            base_url: SAUCE_DEMO_URL.to_string(),
            wait_timeout_ms: duration_ms(DEFAULT_TIMEOUT),
            poll_interval_ms: duration_ms(DEFAULT_POLL_INTERVAL),
            headless: browser.headless,
            maximize: browser.maximize,
            window_width: browser.window_size.0,
            window_height: browser.window_size.1,
            chrome_path: None,
            artifacts_dir: None,
        }
    }
}

impl E2eConfig {
    /// Loads and validates configuration from every source.
    ///
    /// `path` names a config file explicitly; without it `sauce-e2e.toml` is
    /// used if present.
    ///
    /// # Errors
    ///
    /// Returns `Config` if an explicit file is missing, a source fails to
    /// parse, or the merged result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(E2eError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
        }

        let config = Self::from_figment(Self::figment(path))?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// The layered sources `load` reads from.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let file = path.map(Path::to_path_buf).or_else(|| {
            let default_path = Path::new(CONFIG_FILE);
            default_path.exists().then(|| default_path.to_path_buf())
        });
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extracts and validates a config from `figment`.
    ///
    /// # Errors
    ///
    /// Returns `Config` on extraction or validation failure.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| E2eError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(E2eError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.wait_timeout_ms == 0 {
            return Err(E2eError::Config("wait_timeout_ms must be positive".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(E2eError::Config("poll_interval_ms must be positive".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(E2eError::Config(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        Ok(())
    }

    /// Bounded-wait policy for element lookups.
    #[must_use]
    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig::new(
            Duration::from_millis(self.wait_timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }

    /// Browser launch settings.
    #[must_use]
    pub fn browser_config(&self) -> TestBrowserConfig {
        TestBrowserConfig {
            headless: self.headless,
            maximize: self.maximize,
            window_size: (self.window_width, self.window_height),
            chrome_path: self.chrome_path.clone(),
            ..TestBrowserConfig::default()
        }
    }

    /// The storefront with this config's wait policy.
    #[must_use]
    pub fn target(&self) -> TargetApp {
        TargetApp::new(self.base_url.clone()).with_wait(self.wait_config())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
