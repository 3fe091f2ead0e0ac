//! Command structs for engine write operations.
//!
//! One typed input per operation. The web layer fills these from request
//! bodies; the engine trims and validates them before touching the store.

/// Register a client.
#[derive(Clone, Debug)]
pub struct NewClient {
    pub name: String,
    pub address: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Register a product and link it to existing categories.
#[derive(Clone, Debug)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub category_ids: Vec<i32>,
}

impl NewProduct {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn category(mut self, category_id: i32) -> Self {
        self.category_ids.push(category_id);
        self
    }

    #[must_use]
    pub fn categories(mut self, category_ids: impl IntoIterator<Item = i32>) -> Self {
        self.category_ids.extend(category_ids);
        self
    }
}

/// Register a stock entry. `product_id` may be left unset.
#[derive(Clone, Debug)]
pub struct NewStock {
    pub quantity: i32,
    pub product_id: Option<i32>,
}

impl NewStock {
    #[must_use]
    pub fn new(quantity: i32) -> Self {
        Self {
            quantity,
            product_id: None,
        }
    }

    #[must_use]
    pub fn product(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

#[derive(Clone, Debug)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Sign up a user.
///
/// `password_confirmation` must equal `password`; neither is ever stored.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl NewUser {
    /// Build a sign-up whose confirmation already matches the password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            password_confirmation: password.clone(),
            password,
        }
    }

    #[must_use]
    pub fn confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirmation = confirmation.into();
        self
    }
}

/// Place an order for a product on behalf of the signed-in user.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub product_id: i32,
    pub quantity: i32,
}

impl NewOrder {
    #[must_use]
    pub fn new(product_id: i32, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}
