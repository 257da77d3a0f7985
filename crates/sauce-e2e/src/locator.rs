//! Element locators.
//!
//! A [`Locator`] is a (strategy, value) pair naming one kind of DOM element.
//! Locators are plain values: page objects build a fresh one for every
//! lookup and never keep the element handle a lookup returns. The storefront
//! re-renders its DOM after most actions, so a handle is only good for the
//! action it was resolved for.
//!
//! Every strategy renders to a CSS selector, which is what both the
//! chromiumoxide driver and `document.querySelector` consume.

use std::fmt;

/// Identifies DOM elements by a lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Match on the `id` attribute.
    Id(String),
    /// Match on one class token.
    ClassName(String),
    /// A raw CSS selector.
    Css(String),
    /// `target` anywhere inside an element matched by `scope`.
    Descendant {
        /// The enclosing element
        scope: Box<Locator>,
        /// The element to find within `scope`
        target: Box<Locator>,
    },
}

impl Locator {
    /// Locates by `id`.
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// Locates by class name.
    pub fn class(value: impl Into<String>) -> Self {
        Self::ClassName(value.into())
    }

    /// Locates by raw CSS selector.
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    /// Narrows `target` to elements inside `self`.
    #[must_use]
    pub fn within(self, target: Locator) -> Self {
        Self::Descendant {
            scope: Box::new(self),
            target: Box::new(target),
        }
    }

    /// Renders the locator as a CSS selector.
    ///
    /// Ids made only of ASCII alphanumerics, `-` and `_` render as `#id`;
    /// anything else (product ids can contain `.` and parentheses) falls back
    /// to a quoted attribute selector.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Locator::Id(id) if is_plain_ident(id) => format!("#{id}"),
            Locator::Id(id) => format!("[id=\"{}\"]", escape_quoted(id)),
            Locator::ClassName(class) => format!(".{class}"),
            Locator::Css(css) => css.clone(),
            Locator::Descendant { scope, target } => {
                format!("{} {}", scope.to_css(), target.to_css())
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "id={id}"),
            Locator::ClassName(class) => write!(f, "class={class}"),
            Locator::Css(css) => write!(f, "css={css}"),
            Locator::Descendant { scope, target } => write!(f, "{target} within {scope}"),
        }
    }
}

fn is_plain_ident(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with(|c: char| c.is_ascii_digit())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
