//! Test data for the storefront scenarios.
//!
//! Everything here is immutable and describes the public demo deployment:
//! its accounts, the catalog items the scenarios touch, and the customer
//! details used at checkout.

/// A username/password pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Credentials {
    /// Login name
    pub username: &'static str,
    /// Password
    pub password: &'static str,
}

impl Credentials {
    /// Builds a pair.
    #[must_use]
    pub const fn new(username: &'static str, password: &'static str) -> Self {
        Self { username, password }
    }
}

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "secret_sauce";

/// The account with no injected faults.
pub const STANDARD_USER: Credentials = Credentials::new("standard_user", DEMO_PASSWORD);

/// The account the storefront refuses to log in.
pub const LOCKED_OUT_USER: Credentials = Credentials::new("locked_out_user", DEMO_PASSWORD);

/// Logs in but renders broken images and misbehaving controls.
pub const PROBLEM_USER: Credentials = Credentials::new("problem_user", DEMO_PASSWORD);

/// Logs in after an artificial delay.
pub const PERFORMANCE_GLITCH_USER: Credentials =
    Credentials::new("performance_glitch_user", DEMO_PASSWORD);

/// The accounts exercised by the login scenarios.
pub const TEST_USERS: [Credentials; 4] = [
    STANDARD_USER,
    LOCKED_OUT_USER,
    PROBLEM_USER,
    PERFORMANCE_GLITCH_USER,
];

/// What a login attempt should lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginOutcome {
    /// The product listing loads.
    Inventory,
    /// An error banner mentioning "locked out" is shown.
    LockedOut,
}

/// One row of the login fixture table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoginCase {
    /// Credentials to submit
    pub credentials: Credentials,
    /// Expected result
    pub expected: LoginOutcome,
}

impl LoginCase {
    /// Scenario name for this row, e.g. `login/standard_user`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("login/{}", self.credentials.username)
    }
}

/// Login fixture table: every test user and the outcome it must produce.
pub const LOGIN_CASES: [LoginCase; 4] = [
    LoginCase {
        credentials: STANDARD_USER,
        expected: LoginOutcome::Inventory,
    },
    LoginCase {
        credentials: LOCKED_OUT_USER,
        expected: LoginOutcome::LockedOut,
    },
    LoginCase {
        credentials: PROBLEM_USER,
        expected: LoginOutcome::Inventory,
    },
    LoginCase {
        credentials: PERFORMANCE_GLITCH_USER,
        expected: LoginOutcome::Inventory,
    },
];

/// Catalog item names used by the scenarios.
pub mod products {
    /// $29.99
    pub const BACKPACK: &str = "Sauce Labs Backpack";
    /// $9.99
    pub const BIKE_LIGHT: &str = "Sauce Labs Bike Light";
    /// $7.99, the cheapest item
    pub const ONESIE: &str = "Sauce Labs Onesie";
    /// $49.99, the most expensive item
    pub const FLEECE_JACKET: &str = "Sauce Labs Fleece Jacket";
}

/// Customer details entered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// First name
    pub first_name: &'static str,
    /// Last name
    pub last_name: &'static str,
    /// Postal code, passed through unvalidated
    pub postal_code: &'static str,
}

/// The customer used by the checkout scenario.
pub const CUSTOMER: CheckoutDetails = CheckoutDetails {
    first_name: "John",
    last_name: "Doe",
    postal_code: "12345",
};
