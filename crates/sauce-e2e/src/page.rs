//! A Chrome tab driven over CDP.
//!
//! [`Page`] wraps `chromiumoxide::page::Page` and implements [`Driver`] on top
//! of it. Lookups go through `document.querySelector` first so an absent
//! element is a plain `None` rather than a protocol error.

use crate::driver::Driver;
use crate::error::{E2eError, Result};
use crate::locator::Locator;
use crate::wait::{WaitConfig, wait_for_result};
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page as ChromePage;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// A browser page (tab) under test.
///
/// Cloning is cheap and yields another handle to the same tab.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Arc<ChromePage>,
}

/// What the dropdown script reports back.
#[derive(Debug, Deserialize)]
struct SelectOutcome {
    found: bool,
    options: Vec<String>,
}

impl Page {
    /// Wraps a chromiumoxide page. Called by `TestBrowser::new_page`.
    pub(crate) fn new(page: ChromePage) -> Self {
        Self {
            inner: Arc::new(page),
        }
    }

    /// Waits for `document.readyState` to reach `"complete"`.
    ///
    /// `goto` calls this already; call it directly after a click that
    /// triggers a full page load.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never finishes loading.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| E2eError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete"))
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and deserializes the result.
    ///
    /// Never splice untrusted text into `script`; encode it with
    /// [`js_string`] first.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if the script throws or its result
    /// does not deserialize into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| E2eError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| E2eError::ScriptExecutionFailed(e.to_string()))
    }

    /// Takes a screenshot of the page and returns PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| E2eError::ScriptExecutionFailed(e.to_string()))
    }

    async fn exists(&self, css: &str) -> Result<bool> {
        let script = format!("!!document.querySelector({})", js_string(css)?);
        self.evaluate(&script).await
    }
}

#[async_trait]
impl Driver for Page {
    type Element = Element;

    async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.inner
            .goto(url)
            .await
            .map_err(|e| E2eError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(WaitConfig::default()).await
    }

    async fn current_url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    async fn query(&self, locator: &Locator) -> Result<Option<Element>> {
        let css = locator.to_css();
        if !self.exists(&css).await? {
            return Ok(None);
        }
        Ok(Some(self.inner.find_element(css).await?))
    }

    async fn query_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        Ok(self.inner.find_elements(locator.to_css()).await?)
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element.click().await?;
        Ok(())
    }

    async fn type_text(&self, element: &Element, text: &str) -> Result<()> {
        element.click().await?.type_str(text).await?;
        Ok(())
    }

    async fn text(&self, element: &Element) -> Result<String> {
        Ok(element.inner_text().await?.unwrap_or_default())
    }

    async fn select_by_visible_text(&self, locator: &Locator, label: &str) -> Result<()> {
        let script = select_script(&locator.to_css(), label)?;
        let raw: String = self.evaluate(&script).await?;
        let outcome: SelectOutcome = serde_json::from_str(&raw)
            .map_err(|e| E2eError::ScriptExecutionFailed(e.to_string()))?;

        if outcome.found {
            Ok(())
        } else {
            Err(E2eError::OptionNotFound {
                option: label.to_string(),
                available: outcome.options,
            })
        }
    }
}

/// Encodes `value` as a JavaScript string literal.
///
/// JSON string syntax is valid JavaScript, so this escapes quotes, backticks
/// and newlines without any hand-written rules.
///
/// # Errors
///
/// Returns `ScriptExecutionFailed` if serialization fails.
pub fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| E2eError::ScriptExecutionFailed(e.to_string()))
}

/// Builds the script that selects an option by visible text.
///
/// The storefront is a React app, so the value is assigned through the
/// native `HTMLSelectElement` setter and a bubbling `change` event is
/// dispatched; a plain `select.value = ..` would be ignored by React.
fn select_script(css: &str, label: &str) -> Result<String> {
    let css = js_string(css)?;
    let label = js_string(label)?;
    Ok(format!(
        r"(() => {{
    const select = document.querySelector({css});
    if (!select) return JSON.stringify({{ found: false, options: [] }});
    const options = Array.from(select.options);
    const labels = options.map(o => o.text.trim());
    const option = options.find(o => o.text.trim() === {label});
    if (!option) return JSON.stringify({{ found: false, options: labels }});
    const setter = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set;
    setter.call(select, option.value);
    select.dispatchEvent(new Event('change', {{ bubbles: true }}));
    return JSON.stringify({{ found: true, options: labels }});
}})()"
    ))
}
