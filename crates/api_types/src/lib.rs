use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignUp {
        pub username: String,
        pub password: String,
        /// Must repeat `password`.
        pub password_confirmation: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignIn {
        pub username: String,
        pub password: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub username: String,
    }

    /// Response of `GET /me`. `user` is `None` for anonymous requests.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Me {
        pub authenticated: bool,
        pub user: Option<UserView>,
    }
}

pub mod client {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClientNew {
        pub name: String,
        pub address: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ClientView {
        pub id: i32,
        pub name: String,
        pub address: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClientListResponse {
        pub clients: Vec<ClientView>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod product {
    use super::*;
    use crate::category::CategoryView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductNew {
        pub code: String,
        pub name: String,
        /// Ids of existing categories. Omitted means none.
        #[serde(default)]
        pub categories: Vec<i32>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ProductView {
        pub id: i32,
        pub code: String,
        pub name: Option<String>,
        pub categories: Vec<CategoryView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductListResponse {
        pub products: Vec<ProductView>,
    }
}

pub mod stock {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StockNew {
        pub quantity: i32,
        pub product_id: Option<i32>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StockView {
        pub id: i32,
        pub quantity: i32,
        pub product_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StockListResponse {
        pub stock: Vec<StockView>,
    }
}

pub mod order {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderNew {
        pub product_id: i32,
        pub quantity: i32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OrderView {
        pub id: i32,
        pub product_id: Option<i32>,
        pub quantity: i32,
        pub user_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderListResponse {
        pub orders: Vec<OrderView>,
    }
}
