//! Order views derived on the client
//!
//! - [`aggregate_orders`]: status tallies, per-guest grouping and the
//!   "currently serving" partition used by the order management screen.

mod aggregate;

pub use aggregate::{OrderAggregation, StatusCounts, StatusTally, aggregate_orders};
