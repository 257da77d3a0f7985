//! An in-process storefront implementing `Driver`.
//!
//! It models the screens, controls and rules of the demo shop closely enough
//! to drive the real page objects and scenarios without Chrome. Elements are
//! resolved against the selectors in [`markup`], written out by hand from the
//! storefront's HTML rather than taken from the page objects. A page object
//! whose locator names an id or class missing from that table finds nothing
//! here. Selectors are compared as rendered text, so two spellings that a
//! browser would treat as equal may still differ here; only the `#id` and
//! `[id="..."]` forms of an id are both accepted.

#![allow(dead_code)]

use async_trait::async_trait;
use sauce_e2e::fixtures::{DEMO_PASSWORD, LOCKED_OUT_USER, TEST_USERS};
use sauce_e2e::pages::SortOption;
use sauce_e2e::target::{CHECKOUT_COMPLETE_PATH, INVENTORY_PATH};
use sauce_e2e::{Driver, E2eError, Locator, Result, TargetApp, WaitConfig};
use std::sync::Mutex;
use std::time::Duration;

pub const BASE_URL: &str = "http://shop.test/";

pub const LOCKED_OUT_MESSAGE: &str = "Epic sadface: Sorry, this user has been locked out.";
pub const USERNAME_REQUIRED: &str = "Epic sadface: Username is required";
pub const PASSWORD_REQUIRED: &str = "Epic sadface: Password is required";
pub const BAD_CREDENTIALS: &str =
    "Epic sadface: Username and password do not match any user in this service";

/// (name, price in cents), in the listing's default A-to-Z order.
pub const CATALOG: [(&str, u32); 6] = [
    ("Sauce Labs Backpack", 2999),
    ("Sauce Labs Bike Light", 999),
    ("Sauce Labs Bolt T-Shirt", 1599),
    ("Sauce Labs Fleece Jacket", 4999),
    ("Sauce Labs Onesie", 799),
    ("Test.allTheThings() T-Shirt (Red)", 1599),
];

/// The slug in each product's control ids, in `CATALOG` order.
pub const PRODUCT_IDS: [&str; 6] = [
    "sauce-labs-backpack",
    "sauce-labs-bike-light",
    "sauce-labs-bolt-t-shirt",
    "sauce-labs-fleece-jacket",
    "sauce-labs-onesie",
    "test.allthethings()-t-shirt-(red)",
];

/// The sort dropdown's options, by visible text.
const SORT_OPTIONS: [(&str, SortOption); 4] = [
    ("Name (A to Z)", SortOption::NameAscending),
    ("Name (Z to A)", SortOption::NameDescending),
    ("Price (low to high)", SortOption::PriceAscending),
    ("Price (high to low)", SortOption::PriceDescending),
];

/// Selectors for the elements the storefront renders.
pub mod markup {
    pub const USERNAME: &str = "#user-name";
    pub const PASSWORD: &str = "#password";
    pub const LOGIN_BUTTON: &str = "#login-button";
    pub const ERROR_BANNER: &str = ".error-message-container";

    pub const CART_LINK: &str = ".shopping_cart_link";
    pub const CART_BADGE: &str = ".shopping_cart_badge";

    pub const INVENTORY_NAMES: &str = ".inventory_list .inventory_item_name";
    pub const SORT_DROPDOWN: &str = ".product_sort_container";
    pub const ROW_PREFIX: &str = ".inventory_item:has(";
    pub const PRICE_SUFFIX: &str = ") .inventory_item_price";

    pub const CART_LIST: &str = ".cart_list";
    pub const CART_NAMES: &str = ".cart_item .inventory_item_name";
    pub const CHECKOUT: &str = "#checkout";
    pub const CONTINUE_SHOPPING: &str = "#continue-shopping";

    pub const FIRST_NAME: &str = "#first-name";
    pub const LAST_NAME: &str = "#last-name";
    pub const POSTAL_CODE: &str = "#postal-code";
    pub const CONTINUE: &str = "#continue";
    pub const FINISH: &str = "#finish";
    pub const TOTAL: &str = ".summary_total_label";
}

/// Target pointing at the fake, with waits short enough for tests.
pub fn target() -> TargetApp {
    TargetApp::new(BASE_URL).with_wait(WaitConfig::new(
        Duration::from_millis(200),
        Duration::from_millis(5),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Blank,
    Login,
    Inventory,
    Cart,
    CheckoutInfo,
    CheckoutOverview,
    Complete,
}

impl Screen {
    fn path(self) -> Option<&'static str> {
        match self {
            Screen::Blank => None,
            Screen::Login => Some(""),
            Screen::Inventory => Some(INVENTORY_PATH),
            Screen::Cart => Some("cart.html"),
            Screen::CheckoutInfo => Some("checkout-step-one.html"),
            Screen::CheckoutOverview => Some("checkout-step-two.html"),
            Screen::Complete => Some(CHECKOUT_COMPLETE_PATH),
        }
    }

    fn from_path(path: &str) -> Option<Screen> {
        [
            Screen::Login,
            Screen::Inventory,
            Screen::Cart,
            Screen::CheckoutInfo,
            Screen::CheckoutOverview,
            Screen::Complete,
        ]
        .into_iter()
        .find(|screen| screen.path() == Some(path))
    }
}

/// Handle to a rendered element. Only valid until the next re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeElement {
    css: String,
    index: usize,
    render: u64,
}

#[derive(Debug)]
struct State {
    screen: Screen,
    /// Bumped whenever the DOM is replaced.
    render: u64,
    /// Queries left before the current render becomes visible.
    lag_remaining: u32,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    postal_code: String,
    error: Option<String>,
    logged_in: bool,
    /// Catalog indices, in the order they were added.
    cart: Vec<usize>,
    sort: SortOption,
    visits: Vec<String>,
}

pub struct FakeStorefront {
    state: Mutex<State>,
    render_lag: u32,
}

impl Default for FakeStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                screen: Screen::Blank,
                render: 0,
                lag_remaining: 0,
                username: String::new(),
                password: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                postal_code: String::new(),
                error: None,
                logged_in: false,
                cart: Vec::new(),
                sort: SortOption::NameAscending,
                visits: Vec::new(),
            }),
            render_lag: 0,
        }
    }

    /// After every re-render, hide the new DOM from the next `queries` lookups.
    pub fn with_render_lag(mut self, queries: u32) -> Self {
        self.render_lag = queries;
        self
    }

    pub fn screen(&self) -> Screen {
        self.state.lock().unwrap().screen
    }

    pub fn cart_names(&self) -> Vec<&'static str> {
        let state = self.state.lock().unwrap();
        state.cart.iter().map(|&i| CATALOG[i].0).collect()
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.lock().unwrap().visits.clone()
    }

    pub fn sort(&self) -> SortOption {
        self.state.lock().unwrap().sort
    }

    fn rerender(&self, state: &mut State, screen: Screen) {
        state.screen = screen;
        state.render += 1;
        state.lag_remaining = self.render_lag;
    }

    fn resolve(&self, state: &State, locator: &Locator) -> Vec<FakeElement> {
        let css = locator.to_css();
        let count = matches(state, &css);
        (0..count)
            .map(|index| FakeElement {
                css: css.clone(),
                index,
                render: state.render,
            })
            .collect()
    }

    fn check_fresh(state: &State, element: &FakeElement) -> Result<()> {
        if element.render == state.render {
            Ok(())
        } else {
            Err(E2eError::ConnectionFailed(format!(
                "stale element reference: {}",
                element.css
            )))
        }
    }

    fn submit_login(&self, state: &mut State) {
        let username = state.username.clone();
        let password = state.password.clone();

        let error = if username.is_empty() {
            Some(USERNAME_REQUIRED)
        } else if password.is_empty() {
            Some(PASSWORD_REQUIRED)
        } else if !TEST_USERS.iter().any(|c| c.username == username) || password != DEMO_PASSWORD
        {
            Some(BAD_CREDENTIALS)
        } else if username == LOCKED_OUT_USER.username {
            Some(LOCKED_OUT_MESSAGE)
        } else {
            None
        };

        match error {
            Some(message) => {
                state.error = Some(message.to_string());
                self.rerender(state, Screen::Login);
            }
            None => {
                state.logged_in = true;
                state.error = None;
                state.cart.clear();
                state.sort = SortOption::NameAscending;
                self.rerender(state, Screen::Inventory);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    AddToCart,
    Remove,
}

/// True if `css` selects exactly the element with `id`.
fn selects_id(css: &str, id: &str) -> bool {
    css.strip_prefix('#') == Some(id) || css == format!("[id=\"{id}\"]")
}

/// The product and control a cart-button selector names.
fn product_control(css: &str) -> Option<(usize, Control)> {
    PRODUCT_IDS.iter().enumerate().find_map(|(i, slug)| {
        if selects_id(css, &format!("add-to-cart-{slug}")) {
            Some((i, Control::AddToCart))
        } else if selects_id(css, &format!("remove-{slug}")) {
            Some((i, Control::Remove))
        } else {
            None
        }
    })
}

/// The product whose price `css` selects: the price inside the
/// `.inventory_item` row that holds one of that product's cart controls.
fn price_row(css: &str) -> Option<usize> {
    let inner = css
        .strip_prefix(markup::ROW_PREFIX)?
        .strip_suffix(markup::PRICE_SUFFIX)?;
    let mut rows = inner
        .split(", ")
        .map(|control| product_control(control).map(|(i, _)| i));
    let first = rows.next()??;
    rows.all(|row| row == Some(first)).then_some(first)
}

fn sorted_catalog(sort: SortOption) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..CATALOG.len()).collect();
    match sort {
        SortOption::NameAscending => indices.sort_by_key(|&i| CATALOG[i].0),
        SortOption::NameDescending => indices.sort_by(|&a, &b| CATALOG[b].0.cmp(CATALOG[a].0)),
        SortOption::PriceAscending => indices.sort_by_key(|&i| CATALOG[i].1),
        SortOption::PriceDescending => indices.sort_by(|&a, &b| CATALOG[b].1.cmp(&CATALOG[a].1)),
    }
    indices
}

pub fn dollars(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Subtotal, 8% tax rounded to the cent, and total.
pub fn totals(cart: &[usize]) -> (u32, u32, u32) {
    let subtotal: u32 = cart.iter().map(|&i| CATALOG[i].1).sum();
    let tax = (subtotal * 8 + 50) / 100;
    (subtotal, tax, subtotal + tax)
}

/// Number of elements `css` matches on the current screen.
fn matches(state: &State, css: &str) -> usize {
    let present = |yes: bool| usize::from(yes);
    let header = matches!(
        state.screen,
        Screen::Inventory | Screen::Cart | Screen::CheckoutInfo | Screen::CheckoutOverview
    );

    if header {
        match css {
            markup::CART_LINK => return 1,
            markup::CART_BADGE => return present(!state.cart.is_empty()),
            _ => {}
        }
    }

    match state.screen {
        Screen::Blank | Screen::Complete => 0,
        Screen::Login => match css {
            markup::USERNAME | markup::PASSWORD | markup::LOGIN_BUTTON => 1,
            markup::ERROR_BANNER => present(state.error.is_some()),
            _ => 0,
        },
        Screen::Inventory => match css {
            markup::INVENTORY_NAMES => CATALOG.len(),
            markup::SORT_DROPDOWN => 1,
            _ => {
                if let Some((i, control)) = product_control(css) {
                    let in_cart = state.cart.contains(&i);
                    present(match control {
                        Control::AddToCart => !in_cart,
                        Control::Remove => in_cart,
                    })
                } else {
                    present(price_row(css).is_some())
                }
            }
        },
        Screen::Cart => match css {
            markup::CART_LIST | markup::CHECKOUT | markup::CONTINUE_SHOPPING => 1,
            markup::CART_NAMES => state.cart.len(),
            _ => 0,
        },
        Screen::CheckoutInfo => present(matches!(
            css,
            markup::FIRST_NAME | markup::LAST_NAME | markup::POSTAL_CODE | markup::CONTINUE
        )),
        Screen::CheckoutOverview => present(matches!(css, markup::FINISH | markup::TOTAL)),
    }
}

#[async_trait]
impl Driver for FakeStorefront {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<()> {
        let path = url
            .strip_prefix(BASE_URL.trim_end_matches('/'))
            .map(|rest| rest.trim_start_matches('/'))
            .ok_or_else(|| E2eError::NavigationFailed {
                url: url.to_string(),
                reason: "host not served by the fake storefront".into(),
            })?;
        let screen = Screen::from_path(path).ok_or_else(|| E2eError::NavigationFailed {
            url: url.to_string(),
            reason: "404".into(),
        })?;

        let mut state = self.state.lock().unwrap();
        state.visits.push(url.to_string());
        state.username.clear();
        state.password.clear();
        state.first_name.clear();
        state.last_name.clear();
        state.postal_code.clear();
        state.error = None;

        if screen != Screen::Login && !state.logged_in {
            state.error = Some(format!(
                "Epic sadface: You can only access '/{path}' when you are logged in."
            ));
            self.rerender(&mut state, Screen::Login);
        } else {
            self.rerender(&mut state, screen);
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let state = self.state.lock().unwrap();
        Ok(match state.screen.path() {
            Some(path) => format!("{BASE_URL}{path}"),
            None => "about:blank".to_string(),
        })
    }

    async fn query(&self, locator: &Locator) -> Result<Option<FakeElement>> {
        let mut state = self.state.lock().unwrap();
        if state.lag_remaining > 0 {
            state.lag_remaining -= 1;
            return Ok(None);
        }
        Ok(self.resolve(&state, locator).into_iter().next())
    }

    async fn query_all(&self, locator: &Locator) -> Result<Vec<FakeElement>> {
        let state = self.state.lock().unwrap();
        if state.lag_remaining > 0 {
            return Ok(Vec::new());
        }
        Ok(self.resolve(&state, locator))
    }

    async fn click(&self, element: &FakeElement) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_fresh(&state, element)?;
        let css = element.css.as_str();

        match css {
            markup::LOGIN_BUTTON => self.submit_login(&mut state),
            markup::CART_LINK => self.rerender(&mut state, Screen::Cart),
            markup::CHECKOUT => self.rerender(&mut state, Screen::CheckoutInfo),
            markup::CONTINUE_SHOPPING => self.rerender(&mut state, Screen::Inventory),
            markup::CONTINUE => {
                let complete = !state.first_name.is_empty()
                    && !state.last_name.is_empty()
                    && !state.postal_code.is_empty();
                let next = if complete {
                    Screen::CheckoutOverview
                } else {
                    Screen::CheckoutInfo
                };
                self.rerender(&mut state, next);
            }
            markup::FINISH => {
                state.cart.clear();
                self.rerender(&mut state, Screen::Complete);
            }
            _ => {
                if let Some((i, control)) = product_control(css) {
                    match control {
                        Control::AddToCart => state.cart.push(i),
                        Control::Remove => state.cart.retain(|&c| c != i),
                    }
                    let screen = state.screen;
                    self.rerender(&mut state, screen);
                }
            }
        }
        Ok(())
    }

    async fn type_text(&self, element: &FakeElement, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_fresh(&state, element)?;
        let css = element.css.as_str();

        let field = match css {
            markup::USERNAME => &mut state.username,
            markup::PASSWORD => &mut state.password,
            markup::FIRST_NAME => &mut state.first_name,
            markup::LAST_NAME => &mut state.last_name,
            markup::POSTAL_CODE => &mut state.postal_code,
            _ => {
                return Err(E2eError::ScriptExecutionFailed(format!(
                    "element {css} is not editable"
                )));
            }
        };
        field.push_str(text);
        Ok(())
    }

    async fn text(&self, element: &FakeElement) -> Result<String> {
        let state = self.state.lock().unwrap();
        Self::check_fresh(&state, element)?;
        let css = element.css.as_str();

        Ok(match css {
            markup::ERROR_BANNER => state.error.clone().unwrap_or_default(),
            markup::CART_BADGE => state.cart.len().to_string(),
            markup::INVENTORY_NAMES => {
                let order = sorted_catalog(state.sort);
                CATALOG[order[element.index]].0.to_string()
            }
            markup::CART_NAMES => CATALOG[state.cart[element.index]].0.to_string(),
            markup::TOTAL => {
                let (_, _, total) = totals(&state.cart);
                format!("Total: {}", dollars(total))
            }
            _ => price_row(css)
                .map(|i| dollars(CATALOG[i].1))
                .unwrap_or_default(),
        })
    }

    async fn select_by_visible_text(&self, locator: &Locator, label: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if self.resolve(&state, locator).is_empty()
            || locator.to_css() != markup::SORT_DROPDOWN
        {
            return Err(E2eError::NotFound {
                locator: locator.to_string(),
                timeout: Duration::ZERO,
            });
        }

        let option = SORT_OPTIONS
            .into_iter()
            .find_map(|(text, option)| (text == label).then_some(option))
            .ok_or_else(|| E2eError::OptionNotFound {
                option: label.to_string(),
                available: SORT_OPTIONS.iter().map(|(text, _)| text.to_string()).collect(),
            })?;

        state.sort = option;
        let screen = state.screen;
        self.rerender(&mut state, screen);
        Ok(())
    }
}

