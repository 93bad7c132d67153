//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status
///
/// `Pending` → `Processing` → `Delivered` → `Paid`, or `Rejected` at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Paid,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Delivered,
        OrderStatus::Paid,
        OrderStatus::Rejected,
    ];

    /// Non-terminal status: the guest is still being served
    pub fn is_serving(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Delivered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Delivered => "Delivered",
            Self::Paid => "Paid",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
///
/// `guest_id` / `table_number` become `None` when the guest or table has been
/// deleted; the order keeps its historical status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub guest_id: Option<i64>,
    pub table_number: Option<i64>,
    pub dish_id: i64,
    pub quantity: i32,
    /// Staff account that last handled the order
    pub order_handler_id: Option<i64>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
