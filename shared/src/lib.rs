//! Shared types for the Resto workspace
//!
//! Domain models, wire payloads and pure logic used by both `resto-client`
//! and `resto-edge`. Nothing in this crate performs I/O.

pub mod client;
pub mod error;
pub mod models;
pub mod order;
pub mod token;

// Re-exports
pub use error::{EntityErrorPayload, FieldError};
pub use models::{
    Account, AccountListParams, CredentialPair, Dish, DishListParams, DishStatus, Guest, Locale,
    Order, OrderStatus, Role, TokenPayload, TokenType,
};
pub use order::{OrderAggregation, StatusCounts, aggregate_orders};
pub use token::{TokenError, decode_unverified, now_unix};
