//! Inventory engine: entity schema, persistence gateway and the
//! authentication boundary.
//!
//! Every write goes through [`Engine`], which runs it inside a single
//! database transaction.

pub use categories::Category;
pub use clients::Client;
pub use commands::{NewCategory, NewClient, NewOrder, NewProduct, NewStock, NewUser};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, Identity};
pub use products::Product;
pub use sessions::Session;
pub use stock::Stock;
pub use user_orders::Order;
pub use users::User;

mod categories;
mod clients;
mod commands;
mod credentials;
mod error;
mod ops;
mod product_categories;
mod products;
mod sessions;
mod stock;
mod user_orders;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
