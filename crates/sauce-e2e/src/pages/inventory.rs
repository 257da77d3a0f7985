//! The product listing.
//!
//! Products are addressed by identifier rather than by walking the DOM from
//! their label. The storefront gives each product's cart control the id
//! `add-to-cart-<slug>` (or `remove-<slug>` once it is in the cart), where
//! the slug is derived from the product name by [`product_slug`]. The price
//! is found inside whichever `.inventory_item` row holds one of those
//! controls.

use super::Finder;
use crate::driver::Driver;
use crate::error::{E2eError, Result};
use crate::target::TargetApp;
use std::fmt;
use tracing::info;

/// Locators for the inventory screen.
pub mod locators {
    use super::product_slug;
    use crate::locator::Locator;

    /// "Add to cart" control of one product.
    pub fn add_to_cart(item_name: &str) -> Locator {
        Locator::id(format!("add-to-cart-{}", product_slug(item_name)))
    }

    /// "Remove" control of one product.
    pub fn remove(item_name: &str) -> Locator {
        Locator::id(format!("remove-{}", product_slug(item_name)))
    }

    /// The `.inventory_item` row containing one product's cart control.
    pub fn product_row(item_name: &str) -> Locator {
        Locator::css(format!(
            ".inventory_item:has({}, {})",
            add_to_cart(item_name).to_css(),
            remove(item_name).to_css()
        ))
    }

    /// Displayed price of one product.
    pub fn item_price(item_name: &str) -> Locator {
        product_row(item_name).within(Locator::class("inventory_item_price"))
    }

    /// Every product label on the listing.
    pub fn item_names() -> Locator {
        Locator::class("inventory_list").within(Locator::class("inventory_item_name"))
    }

    /// Item count badge; absent while the cart is empty.
    pub fn cart_badge() -> Locator {
        Locator::class("shopping_cart_badge")
    }

    /// Cart icon.
    pub fn cart_link() -> Locator {
        Locator::class("shopping_cart_link")
    }

    /// Sort dropdown.
    pub fn sort_dropdown() -> Locator {
        Locator::class("product_sort_container")
    }
}

/// Derives the identifier the storefront uses in a product's control ids:
/// whitespace runs become `-` and the result is lowercased.
///
/// ```
/// use sauce_e2e::pages::inventory::product_slug;
///
/// assert_eq!(product_slug("Sauce Labs Backpack"), "sauce-labs-backpack");
/// ```
#[must_use]
pub fn product_slug(item_name: &str) -> String {
    item_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// The orderings offered by the sort dropdown, by visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// "Name (A to Z)"
    NameAscending,
    /// "Name (Z to A)"
    NameDescending,
    /// "Price (low to high)"
    PriceAscending,
    /// "Price (high to low)"
    PriceDescending,
}

impl SortOption {
    /// Every option, in dropdown order.
    pub const ALL: [SortOption; 4] = [
        SortOption::NameAscending,
        SortOption::NameDescending,
        SortOption::PriceAscending,
        SortOption::PriceDescending,
    ];

    /// The option's visible text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOption::NameAscending => "Name (A to Z)",
            SortOption::NameDescending => "Name (Z to A)",
            SortOption::PriceAscending => "Price (low to high)",
            SortOption::PriceDescending => "Price (high to low)",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The product listing shown after login.
pub struct InventoryPage<'a, D: Driver> {
    finder: Finder<'a, D>,
}

impl<'a, D: Driver> InventoryPage<'a, D> {
    /// Wraps `driver` for the inventory screen of `target`.
    pub fn new(driver: &'a D, target: &'a TargetApp) -> Self {
        Self {
            finder: Finder::new(driver, target.wait()),
        }
    }

    /// Clicks "Add to cart" for the product labelled `item_name`.
    ///
    /// The product is matched through its slug id, so case and runs of
    /// whitespace in `item_name` do not matter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product's slug matches (or it is already in
    /// the cart).
    pub async fn add_item_to_cart(&self, item_name: &str) -> Result<()> {
        info!(item_name, "adding to cart");
        self.finder.click(&locators::add_to_cart(item_name)).await
    }

    /// Clicks "Remove" for the product labelled `item_name`, matched by slug
    /// like [`Self::add_item_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if that product is not in the cart.
    pub async fn remove_item_from_cart(&self, item_name: &str) -> Result<()> {
        info!(item_name, "removing from cart");
        self.finder.click(&locators::remove(item_name)).await
    }

    /// Number shown on the cart badge.
    ///
    /// An empty cart has no badge at all, so this fails with `NotFound`
    /// rather than returning 0. Callers expecting a possibly-empty cart
    /// should check [`E2eError::is_not_found`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an empty cart and `UnexpectedText` if the badge
    /// is not a number.
    pub async fn cart_count(&self) -> Result<u32> {
        let text = self.finder.text_of(&locators::cart_badge()).await?;
        text.trim().parse().map_err(|_| E2eError::UnexpectedText {
            what: "cart badge",
            text,
        })
    }

    /// Clicks the cart icon.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the cart icon is missing.
    pub async fn open_cart(&self) -> Result<()> {
        self.finder.click(&locators::cart_link()).await
    }

    /// Selects the sort option whose visible text is exactly `sort_option`.
    ///
    /// [`SortOption::label`] gives the known labels.
    ///
    /// # Errors
    ///
    /// Returns `OptionNotFound` if the dropdown has no such option.
    pub async fn sort_items(&self, sort_option: &str) -> Result<()> {
        info!(sort_option, "sorting");
        self.finder
            .select_by_visible_text(&locators::sort_dropdown(), sort_option)
            .await
    }

    /// Raw price text (e.g. `$29.99`) of the product labelled `item_name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has that label.
    pub async fn item_price(&self, item_name: &str) -> Result<String> {
        self.finder.text_of(&locators::item_price(item_name)).await
    }

    /// Product labels in display order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the listing never renders.
    pub async fn item_names(&self) -> Result<Vec<String>> {
        self.finder.find(&locators::item_names()).await?;
        self.finder.texts_of_all(&locators::item_names()).await
    }
}
