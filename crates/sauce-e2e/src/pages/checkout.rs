//! The two checkout steps: customer information, then the order overview.

use super::Finder;
use crate::driver::Driver;
use crate::error::Result;
use crate::target::TargetApp;
use tracing::info;

/// Locators for the checkout screens.
pub mod locators {
    use crate::locator::Locator;

    /// First name input.
    pub fn first_name() -> Locator {
        Locator::id("first-name")
    }

    /// Last name input.
    pub fn last_name() -> Locator {
        Locator::id("last-name")
    }

    /// Postal code input.
    pub fn postal_code() -> Locator {
        Locator::id("postal-code")
    }

    /// Submits the information step.
    pub fn continue_button() -> Locator {
        Locator::id("continue")
    }

    /// Places the order from the overview step.
    pub fn finish() -> Locator {
        Locator::id("finish")
    }

    /// Order total on the overview step.
    pub fn total_label() -> Locator {
        Locator::class("summary_total_label")
    }
}

/// Checkout information and overview.
pub struct CheckoutPage<'a, D: Driver> {
    finder: Finder<'a, D>,
}

impl<'a, D: Driver> CheckoutPage<'a, D> {
    /// Wraps `driver` for the checkout screens of `target`.
    pub fn new(driver: &'a D, target: &'a TargetApp) -> Self {
        Self {
            finder: Finder::new(driver, target.wait()),
        }
    }

    /// Types the customer details and continues to the overview.
    ///
    /// Values are not validated; a malformed postal code is submitted as-is.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if any field or the continue button is missing.
    pub async fn fill_information(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> Result<()> {
        info!(first_name, last_name, postal_code, "filling checkout information");
        self.finder.type_into(&locators::first_name(), first_name).await?;
        self.finder.type_into(&locators::last_name(), last_name).await?;
        self.finder.type_into(&locators::postal_code(), postal_code).await?;
        self.finder.click(&locators::continue_button()).await
    }

    /// Clicks "Finish" on the overview.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the button is missing.
    pub async fn finish_checkout(&self) -> Result<()> {
        self.finder.click(&locators::finish()).await
    }

    /// Raw total text, label included (e.g. `Total: $43.18`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the overview is not shown.
    pub async fn total_price(&self) -> Result<String> {
        self.finder.text_of(&locators::total_label()).await
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
