//! The application under test.
//!
//! [`TargetApp`] pairs the storefront's base URL with the bounded-wait policy
//! page objects use against it. Page objects borrow it; they never own it.

use crate::wait::WaitConfig;

/// Base URL of the public Sauce Labs demo storefront.
pub const SAUCE_DEMO_URL: &str = "https://www.saucedemo.com/";

/// Path fragment of the product listing reached after a successful login.
pub const INVENTORY_PATH: &str = "inventory.html";

/// Path fragment of the order confirmation screen.
pub const CHECKOUT_COMPLETE_PATH: &str = "checkout-complete.html";

/// A running storefront plus the wait policy used against it.
///
/// ```ignore
/// let target = TargetApp::new("http://localhost:3000");
/// assert_eq!(target.url("/inventory.html"), "http://localhost:3000/inventory.html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetApp {
    base_url: String,
    wait: WaitConfig,
}

impl TargetApp {
    /// Creates a target with the default wait policy.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            wait: WaitConfig::default(),
        }
    }

    /// Replaces the wait policy.
    #[must_use]
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// The root URL, exactly as configured.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bounded-wait policy for element lookups.
    #[must_use]
    pub fn wait(&self) -> WaitConfig {
        self.wait
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl Default for TargetApp {
    fn default() -> Self {
        Self::new(SAUCE_DEMO_URL)
    }
}
