//! # sauce-e2e
//!
//! End-to-end tests for the Sauce Labs demo storefront, written as page
//! objects over headless Chrome (chromiumoxide).
//!
//! ## Architecture
//!
//! - **Locator**: a (strategy, value) pair naming a DOM element
//! - **WaitConfig**: the bounded wait every lookup goes through
//! - **Driver**: the browser capabilities page objects need
//! - **Page / TestBrowser**: `Driver` over a real Chrome tab, and the
//!   process that owns it
//! - **Page objects**: `LoginPage`, `InventoryPage`, `CartPage`,
//!   `CheckoutPage`, one per screen
//! - **Fixtures**: demo accounts, catalog items, checkout details
//! - **Scenarios**: user journeys with assertions, generic over `Driver`
//! - **Harness**: one browser per scenario, always torn down
//!
//! ## Design Principles
//!
//! 1. **No stale handles**: page objects re-resolve their locator on every
//!    action; the storefront re-renders after most clicks
//! 2. **Bounded waits only**: every lookup polls up to a timeout, then fails
//!    with `NotFound`; a closed or disconnected browser fails at once
//! 3. **Resource-safe**: each scenario owns its Chrome process and the
//!    harness closes it on every exit path
//! 4. **Driver-agnostic**: scenarios run against any `Driver`, which keeps
//!    them testable without a browser
//!
//! ## Example Usage
//!
//! ```ignore
//! use sauce_e2e::{E2eConfig, harness::run_scenario, scenarios};
//!
//! #[tokio::test]
//! async fn checkout() -> sauce_e2e::Result<()> {
//!     let config = E2eConfig::load(None)?;
//!     let target = config.target();
//!
//!     run_scenario(&config, "checkout/complete", |page| async move {
//!         scenarios::complete_checkout(&page, &target).await
//!     })
//!     .await
//! }
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Unit tests**: locators, waits, config, fixtures
//! 2. **Simulated storefront**: every page object and scenario against an
//!    in-process `Driver` (`tests/`)
//! 3. **Live tests**: the same scenarios against the real site in Chrome,
//!    `#[ignore]`d by default
//!
//! Run with `cargo test` or `cargo test -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod config;
pub mod driver;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod locator;
pub mod logging;
pub mod page;
pub mod pages;
pub mod scenarios;
pub mod target;
pub mod wait;

// Re-export main types for convenience
pub use browser::{TestBrowser, TestBrowserConfig};
pub use config::E2eConfig;
pub use driver::Driver;
pub use error::{E2eError, Result};
pub use locator::Locator;
pub use page::Page;
pub use pages::{CartPage, CheckoutPage, InventoryPage, LoginPage, SortOption};
pub use scenarios::Scenario;
pub use target::TargetApp;
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
