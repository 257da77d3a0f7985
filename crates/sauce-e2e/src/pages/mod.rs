//! Page objects for the storefront's screens.
//!
//! Each page object wraps one screen and borrows the driver for the length of
//! a scenario. All of them resolve elements through [`Finder`], which applies
//! the bounded wait and turns a timeout into [`E2eError::NotFound`]. Driver
//! failures that waiting cannot fix, such as a closed browser, pass through
//! unchanged.
//!
//! Page objects assume the session is already on their screen; they do not
//! check or enforce the navigation order
//! Login -> Inventory -> Cart -> Checkout.

pub mod cart;
pub mod checkout;
pub mod inventory;
pub mod login;

pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use inventory::{InventoryPage, SortOption};
pub use login::LoginPage;

use crate::driver::Driver;
use crate::error::{E2eError, Result};
use crate::locator::Locator;
use crate::wait::{WaitConfig, poll_until};
use tracing::debug;

/// Element lookup with a bounded wait, shared by every page object.
pub struct Finder<'a, D: Driver> {
    driver: &'a D,
    wait: WaitConfig,
}

impl<D: Driver> Clone for Finder<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Driver> Copy for Finder<'_, D> {}

impl<'a, D: Driver> Finder<'a, D> {
    /// Creates a finder over `driver` using `wait` for every lookup.
    pub fn new(driver: &'a D, wait: WaitConfig) -> Self {
        Self { driver, wait }
    }

    /// The borrowed driver.
    #[must_use]
    pub fn driver(&self) -> &'a D {
        self.driver
    }

    /// Waits for an element matching `locator` and returns the first match.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing matched before the timeout, or the
    /// driver's error if it is not transient.
    pub async fn find(&self, locator: &Locator) -> Result<D::Element> {
        debug!(%locator, "finding element");
        poll_until(
            || self.driver.query(locator),
            self.wait,
            &locator.to_string(),
        )
        .await
        .map_err(|e| match e {
            E2eError::WaitTimeout { timeout, .. } => E2eError::NotFound {
                locator: locator.to_string(),
                timeout,
            },
            other => other,
        })
    }

    /// Returns every current match without waiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver query fails.
    pub async fn find_all(&self, locator: &Locator) -> Result<Vec<D::Element>> {
        self.driver.query_all(locator).await
    }

    /// Waits for the element, then clicks it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the element never appeared.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.find(locator).await?;
        debug!(%locator, "click");
        self.driver.click(&element).await
    }

    /// Waits for the element, then types `text` into it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the element never appeared.
    pub async fn type_into(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.find(locator).await?;
        debug!(%locator, len = text.len(), "type");
        self.driver.type_text(&element, text).await
    }

    /// Waits for the element, then returns its text.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the element never appeared.
    pub async fn text_of(&self, locator: &Locator) -> Result<String> {
        let element = self.find(locator).await?;
        self.driver.text(&element).await
    }

    /// Texts of every current match, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or a text read fails.
    pub async fn texts_of_all(&self, locator: &Locator) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for element in self.find_all(locator).await? {
            texts.push(self.driver.text(&element).await?);
        }
        Ok(texts)
    }

    /// Waits for the `<select>`, then picks the option labelled `label`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dropdown never appeared and
    /// `OptionNotFound` if it has no such option.
    pub async fn select_by_visible_text(&self, locator: &Locator, label: &str) -> Result<()> {
        self.find(locator).await?;
        debug!(%locator, label, "select");
        self.driver.select_by_visible_text(locator, label).await
    }
}

/// Parses the amount out of displayed price text such as `$29.99` or
/// `Total: $43.18`.
///
/// # Errors
///
/// Returns `UnexpectedText` if there is no `$` amount to parse.
pub fn parse_price(text: &str) -> Result<f64> {
    let unexpected = || E2eError::UnexpectedText {
        what: "price",
        text: text.to_string(),
    };

    let (_, amount) = text.rsplit_once('$').ok_or_else(unexpected)?;
    amount.trim().parse().map_err(|_| unexpected())
}
