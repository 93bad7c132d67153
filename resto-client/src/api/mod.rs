//! Typed API wrappers
//!
//! | Wrapper | Target | Paths |
//! |---------|--------|-------|
//! | [`AuthApi`] | edge (`app_url`) / backend (`s_*`) | `auth/*`, `guest/auth/*` |
//! | [`GuestApi`] | edge / backend | `guest/auth/*`, `guest/orders` |
//! | [`DishApi`] | backend | `dishes`, `media/upload` |
//! | [`OrderApi`] | backend | `orders` |
//! | [`AccountApi`] | backend | `accounts`, `accounts/detail/{id}`, `accounts/guests` |

mod account;
mod auth;
mod dish;
mod guest;
mod order;

pub use account::AccountApi;
pub use auth::{AuthApi, AuthKind};
pub use dish::DishApi;
pub use guest::GuestApi;
pub use order::{OrderApi, OrderListParams};
