//! End-to-end scenarios.
//!
//! Each scenario drives the page objects through one user journey and checks
//! what the storefront shows. Scenarios are generic over [`Driver`], so the
//! same code runs against Chrome and against a simulated storefront.
//! A scenario expects a fresh session: it starts by loading the login screen.

use crate::driver::Driver;
use crate::error::{E2eError, Result, ensure};
use crate::fixtures::{CUSTOMER, LOGIN_CASES, LoginCase, LoginOutcome, STANDARD_USER, products};
use crate::pages::{CartPage, CheckoutPage, InventoryPage, LoginPage, SortOption, parse_price};
use crate::target::{INVENTORY_PATH, TargetApp};
use crate::wait::wait_for_result;
use tracing::info;

/// A runnable scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Log in with one row of the login table.
    Login(LoginCase),
    /// Add an item, check the badge, remove it, check the badge is gone.
    AddRemoveCart,
    /// Compare prices read under the two price orderings.
    SortByPrice,
    /// Buy two items from login to order confirmation.
    CompleteCheckout,
    /// Load the login screen twice in a row.
    NavigateTwice,
}

impl Scenario {
    /// Every scenario, login cases first.
    #[must_use]
    pub fn all() -> Vec<Scenario> {
        LOGIN_CASES
            .into_iter()
            .map(Scenario::Login)
            .chain([
                Scenario::AddRemoveCart,
                Scenario::SortByPrice,
                Scenario::CompleteCheckout,
                Scenario::NavigateTwice,
            ])
            .collect()
    }

    /// Stable name, e.g. `cart/add-remove`.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Scenario::Login(case) => case.name(),
            Scenario::AddRemoveCart => "cart/add-remove".to_string(),
            Scenario::SortByPrice => "inventory/sort-by-price".to_string(),
            Scenario::CompleteCheckout => "checkout/complete".to_string(),
            Scenario::NavigateTwice => "login/navigate-twice".to_string(),
        }
    }

    /// Runs the scenario on `driver` against `target`.
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the storefront shows something unexpected,
    /// or whatever lookup/driver error aborted the journey.
    pub async fn run<D: Driver>(&self, driver: &D, target: &TargetApp) -> Result<()> {
        info!(scenario = %self.name(), "running scenario");
        match self {
            Scenario::Login(case) => login(driver, target, case).await,
            Scenario::AddRemoveCart => add_remove_cart(driver, target).await,
            Scenario::SortByPrice => sort_by_price(driver, target).await,
            Scenario::CompleteCheckout => complete_checkout(driver, target).await,
            Scenario::NavigateTwice => navigate_twice(driver, target).await,
        }
    }
}

/// Logs in with `case.credentials` and checks the expected outcome.
///
/// # Errors
///
/// Returns `Assertion` if the outcome differs from `case.expected`.
pub async fn login<D: Driver>(driver: &D, target: &TargetApp, case: &LoginCase) -> Result<()> {
    let login_page = LoginPage::new(driver, target);
    login_page.navigate().await?;
    login_page
        .login(case.credentials.username, case.credentials.password)
        .await?;

    match case.expected {
        LoginOutcome::LockedOut => {
            let message = login_page.error_message().await?;
            ensure(message.to_lowercase().contains("locked out"), || {
                format!("expected a locked-out error, got '{message}'")
            })
        }
        LoginOutcome::Inventory => expect_url_containing(driver, target, INVENTORY_PATH).await,
    }
}

/// Adding the backpack shows a badge of 1; removing it removes the badge.
///
/// # Errors
///
/// Returns `Assertion` if the badge count is wrong or the badge survives the
/// removal.
pub async fn add_remove_cart<D: Driver>(driver: &D, target: &TargetApp) -> Result<()> {
    log_in_as_standard_user(driver, target).await?;
    let inventory = InventoryPage::new(driver, target);

    inventory.add_item_to_cart(products::BACKPACK).await?;
    let count = inventory.cart_count().await?;
    ensure(count == 1, || format!("expected 1 item in the cart, badge shows {count}"))?;

    inventory.remove_item_from_cart(products::BACKPACK).await?;
    match inventory.cart_count().await {
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(e),
        Ok(count) => Err(E2eError::Assertion(format!(
            "expected no cart badge after removal, badge shows {count}"
        ))),
    }
}

/// The most expensive item (read under high-to-low) costs more than the
/// cheapest (read under low-to-high).
///
/// # Errors
///
/// Returns `Assertion` if the prices are not ordered, or `OptionNotFound` if
/// a sort label is missing.
pub async fn sort_by_price<D: Driver>(driver: &D, target: &TargetApp) -> Result<()> {
    log_in_as_standard_user(driver, target).await?;
    let inventory = InventoryPage::new(driver, target);

    inventory.sort_items(SortOption::PriceAscending.label()).await?;
    let low = parse_price(&inventory.item_price(products::ONESIE).await?)?;

    inventory.sort_items(SortOption::PriceDescending.label()).await?;
    let high = parse_price(&inventory.item_price(products::FLEECE_JACKET).await?)?;

    ensure(high > low, || {
        format!(
            "expected {} (${high}) to cost more than {} (${low})",
            products::FLEECE_JACKET,
            products::ONESIE
        )
    })
}

/// Full purchase of the backpack and bike light.
///
/// # Errors
///
/// Returns `Assertion` if an item is missing from the cart, the total has no
/// amount, or the confirmation screen is not reached.
pub async fn complete_checkout<D: Driver>(driver: &D, target: &TargetApp) -> Result<()> {
    log_in_as_standard_user(driver, target).await?;
    let inventory = InventoryPage::new(driver, target);
    let cart = CartPage::new(driver, target);
    let checkout = CheckoutPage::new(driver, target);

    inventory.add_item_to_cart(products::BACKPACK).await?;
    inventory.add_item_to_cart(products::BIKE_LIGHT).await?;
    inventory.open_cart().await?;

    let items = cart.cart_items().await?;
    for expected in [products::BACKPACK, products::BIKE_LIGHT] {
        ensure(items.iter().any(|item| item == expected), || {
            format!("expected '{expected}' in the cart, found {items:?}")
        })?;
    }

    cart.checkout().await?;
    checkout
        .fill_information(CUSTOMER.first_name, CUSTOMER.last_name, CUSTOMER.postal_code)
        .await?;

    let total = checkout.total_price().await?;
    ensure(total.contains('$'), || format!("expected a dollar total, got '{total}'"))?;

    checkout.finish_checkout().await?;
    expect_url_containing(driver, target, "complete").await
}

/// Loading the login screen twice leaves the session on it both times.
///
/// # Errors
///
/// Returns `Assertion` if either load ends anywhere but the login screen.
pub async fn navigate_twice<D: Driver>(driver: &D, target: &TargetApp) -> Result<()> {
    let login_page = LoginPage::new(driver, target);

    for attempt in 1..=2 {
        login_page.navigate().await?;
        login_page.wait_until_displayed().await?;

        let url = login_page.current_url().await?;
        ensure(
            url.trim_end_matches('/') == target.base_url().trim_end_matches('/'),
            || format!("load {attempt}: expected the login screen, ended on {url}"),
        )?;
    }
    Ok(())
}

async fn log_in_as_standard_user<D: Driver>(driver: &D, target: &TargetApp) -> Result<()> {
    let login_page = LoginPage::new(driver, target);
    login_page.navigate().await?;
    login_page
        .login(STANDARD_USER.username, STANDARD_USER.password)
        .await?;
    expect_url_containing(driver, target, INVENTORY_PATH).await
}

/// Waits (with the target's wait policy) for the URL to contain `fragment`,
/// ignoring case.
async fn expect_url_containing<D: Driver>(
    driver: &D,
    target: &TargetApp,
    fragment: &str,
) -> Result<()> {
    let fragment = fragment.to_lowercase();
    let reached = wait_for_result(
        || {
            let fragment = fragment.clone();
            async move {
                let url = driver.current_url().await?;
                Ok(url.to_lowercase().contains(&fragment))
            }
        },
        target.wait(),
        &format!("URL containing '{fragment}'"),
    )
    .await;

    match reached {
        Ok(()) => Ok(()),
        Err(E2eError::WaitTimeout { .. }) => {
            let url = driver.current_url().await?;
            Err(E2eError::Assertion(format!(
                "expected URL containing '{fragment}', got {url}"
            )))
        }
        Err(e) => Err(e),
    }
}
