//! The browser-automation capability set.
//!
//! Page objects never talk to chromiumoxide directly; they go through
//! [`Driver`]. [`crate::Page`] implements it over a real Chrome tab, and the
//! integration tests implement it over an in-process simulated storefront.

use crate::error::Result;
use crate::locator::Locator;
use async_trait::async_trait;

/// Operations a browser session must provide to drive the page objects.
///
/// `Element` is a handle valid only for the action it was resolved for;
/// callers re-run [`Driver::query`] before every action rather than caching
/// it.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Handle to a resolved DOM element.
    type Element: Send + Sync;

    /// Loads `url` and waits for the document to finish loading.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Returns the session's current location.
    async fn current_url(&self) -> Result<String>;

    /// Returns the first element matching `locator`, if one is present now.
    async fn query(&self, locator: &Locator) -> Result<Option<Self::Element>>;

    /// Returns every element matching `locator`, in document order.
    async fn query_all(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    /// Clicks the element.
    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Focuses the element and types `text` into it.
    async fn type_text(&self, element: &Self::Element, text: &str) -> Result<()>;

    /// Returns the element's rendered text.
    async fn text(&self, element: &Self::Element) -> Result<String>;

    /// Picks the option whose visible text equals `label` in the `<select>`
    /// matched by `locator`, firing the change event the page listens for.
    ///
    /// Fails with `OptionNotFound` when no option carries that label.
    async fn select_by_visible_text(&self, locator: &Locator, label: &str) -> Result<()>;
}
