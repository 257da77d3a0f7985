//! Error types for storefront test operations.
//!
//! The taxonomy separates failures of the browser plumbing (launch,
//! connection, navigation, scripting) from failures a scenario reports about
//! the application under test: an element that never appeared, a dropdown
//! option that does not exist, or an observed state that did not match.
//! Only [`E2eError::is_transient`] errors are retried by the bounded waits;
//! anything else aborts the running scenario.

use std::time::Duration;
use thiserror::Error;

/// The main error type for all storefront test operations.
#[derive(Debug, Error)]
pub enum E2eError {
    /// Failed to launch the browser process.
    ///
    /// This typically occurs when Chrome/Chromium is not installed,
    /// or when there are permission issues with the executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// No element matched the locator before the bounded wait elapsed.
    #[error("no element matching {locator} appeared within {timeout:?}")]
    NotFound {
        /// Rendered form of the locator that was searched for
        locator: String,
        /// How long we waited before giving up
        timeout: Duration,
    },

    /// A dropdown had no option with the requested visible text.
    #[error("option '{option}' not found (available: {available:?})")]
    OptionNotFound {
        /// The visible text that was requested
        option: String,
        /// The visible texts the dropdown actually offers
        available: Vec<String>,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// The observed page state did not match what the scenario expected.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Element text could not be interpreted (e.g. a non-numeric badge).
    #[error("unexpected {what} text: '{text}'")]
    UnexpectedText {
        /// What the text was supposed to represent
        what: &'static str,
        /// The raw text that was read
        text: String,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors (screenshots, config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl E2eError {
    /// Returns true if this is a locator timeout.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, E2eError::NotFound { .. })
    }

    /// Returns true if polling again may succeed.
    ///
    /// CDP errors and script failures happen while the DOM is re-rendering
    /// or a navigation is in flight. A script that failed because the
    /// selector itself is invalid will fail the same way every time.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            E2eError::ChromiumOxide(_) => true,
            E2eError::ScriptExecutionFailed(message) => !is_selector_error(message),
            _ => false,
        }
    }
}

fn is_selector_error(message: &str) -> bool {
    message.contains("SyntaxError") || message.contains("is not a valid selector")
}

/// A specialized Result type for storefront test operations.
pub type Result<T> = std::result::Result<T, E2eError>;

/// Fails with [`E2eError::Assertion`] unless `condition` holds.
///
/// The message is only built on failure.
///
/// # Errors
///
/// Returns `Assertion` when `condition` is false.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(E2eError::Assertion(message()))
    }
}
