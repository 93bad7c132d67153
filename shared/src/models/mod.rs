//! Domain models
//!
//! Shared between resto-edge and resto-client (via API).

pub mod account;
pub mod dish;
pub mod locale;
pub mod order;
pub mod role;
pub mod token;

pub use account::{ACCOUNT_PAGE_SIZE, Account, AccountListParams, Guest};
pub use dish::{CreateDishBody, Dish, DishListParams, DishStatus, SortOrder};
pub use locale::Locale;
pub use order::{Order, OrderStatus};
pub use role::Role;
pub use token::{CredentialPair, TokenPayload, TokenType};
