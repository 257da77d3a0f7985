//! The login screen.

use super::Finder;
use crate::driver::Driver;
use crate::error::Result;
use crate::target::TargetApp;
use tracing::info;

/// Locators for the login screen.
pub mod locators {
    use crate::locator::Locator;

    /// Username input.
    pub fn username() -> Locator {
        Locator::id("user-name")
    }

    /// Password input.
    pub fn password() -> Locator {
        Locator::id("password")
    }

    /// Submit control.
    pub fn login_button() -> Locator {
        Locator::id("login-button")
    }

    /// Banner shown after a rejected login.
    pub fn error_banner() -> Locator {
        Locator::class("error-message-container")
    }
}

/// The storefront's root screen.
pub struct LoginPage<'a, D: Driver> {
    finder: Finder<'a, D>,
    target: &'a TargetApp,
}

impl<'a, D: Driver> LoginPage<'a, D> {
    /// Wraps `driver` for the login screen of `target`.
    pub fn new(driver: &'a D, target: &'a TargetApp) -> Self {
        Self {
            finder: Finder::new(driver, target.wait()),
            target,
        }
    }

    /// Loads the storefront root URL.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page does not load.
    pub async fn navigate(&self) -> Result<()> {
        self.finder.driver().goto(self.target.base_url()).await
    }

    /// Fills in both credentials and submits.
    ///
    /// Nothing is validated here: empty or malformed credentials go to the
    /// storefront as-is and it decides whether to accept them.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if any login control is missing.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        info!(username, "logging in");
        self.finder.type_into(&locators::username(), username).await?;
        self.finder.type_into(&locators::password(), password).await?;
        self.finder.click(&locators::login_button()).await
    }

    /// Text of the error banner.
    ///
    /// Only meaningful after a rejected login.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no error is displayed.
    pub async fn error_message(&self) -> Result<String> {
        self.finder.text_of(&locators::error_banner()).await
    }

    /// Waits until the login form is on screen.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the submit control never appears.
    pub async fn wait_until_displayed(&self) -> Result<()> {
        self.finder.find(&locators::login_button()).await.map(drop)
    }

    /// The session's current location.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot report its URL.
    pub async fn current_url(&self) -> Result<String> {
        self.finder.driver().current_url().await
    }
}
