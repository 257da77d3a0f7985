//! The cart screen.

use super::Finder;
use crate::driver::Driver;
use crate::error::Result;
use crate::target::TargetApp;

/// Locators for the cart screen.
pub mod locators {
    use crate::locator::Locator;

    /// Container of the cart lines; present even when the cart is empty.
    pub fn cart_list() -> Locator {
        Locator::class("cart_list")
    }

    /// Product label of every cart line.
    pub fn item_names() -> Locator {
        Locator::class("cart_item").within(Locator::class("inventory_item_name"))
    }

    /// "Checkout" button.
    pub fn checkout() -> Locator {
        Locator::id("checkout")
    }

    /// "Continue Shopping" button.
    pub fn continue_shopping() -> Locator {
        Locator::id("continue-shopping")
    }
}

/// The cart contents reached from the cart icon.
pub struct CartPage<'a, D: Driver> {
    finder: Finder<'a, D>,
}

impl<'a, D: Driver> CartPage<'a, D> {
    /// Wraps `driver` for the cart screen of `target`.
    pub fn new(driver: &'a D, target: &'a TargetApp) -> Self {
        Self {
            finder: Finder::new(driver, target.wait()),
        }
    }

    /// Clicks "Checkout".
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the button is missing.
    pub async fn checkout(&self) -> Result<()> {
        self.finder.click(&locators::checkout()).await
    }

    /// Clicks "Continue Shopping".
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the button is missing.
    pub async fn continue_shopping(&self) -> Result<()> {
        self.finder.click(&locators::continue_shopping()).await
    }

    /// Names of the items in the cart, in display order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the cart screen never renders.
    pub async fn cart_items(&self) -> Result<Vec<String>> {
        self.finder.find(&locators::cart_list()).await?;
        self.finder.texts_of_all(&locators::item_names()).await
    }
}
