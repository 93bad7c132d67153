//! Order aggregation
//!
//! Pure transform from a flat order list into the three views the order
//! screen renders. Borrowing the input keeps recomputation cheap, so callers
//! simply rerun it whenever the list changes.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Order, OrderStatus};

/// Count per status
pub type StatusTally = BTreeMap<OrderStatus, usize>;

/// Status tallies, flat and per table/guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts {
    /// Every status is present, including zeros
    pub by_status: StatusTally,
    /// table number → guest id → status → count (only statuses seen)
    pub by_table: BTreeMap<i64, BTreeMap<i64, StatusTally>>,
}

impl StatusCounts {
    fn empty() -> Self {
        Self {
            by_status: OrderStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            by_table: BTreeMap::new(),
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.by_status.values().sum()
    }
}

/// Result of [`aggregate_orders`]
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAggregation<'a> {
    pub status_counts: StatusCounts,
    /// guest id → that guest's orders, in input order
    pub orders_by_guest: BTreeMap<i64, Vec<&'a Order>>,
    /// table number → guest id → guest orders, only guests with a serving order.
    /// Tables left without serving guests are absent.
    pub serving_guests_by_table: BTreeMap<i64, BTreeMap<i64, Vec<&'a Order>>>,
}

impl<'a> OrderAggregation<'a> {
    pub fn guest_orders(&self, guest_id: i64) -> &[&'a Order] {
        self.orders_by_guest
            .get(&guest_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn serving_guest_count(&self) -> usize {
        self.serving_guests_by_table.values().map(BTreeMap::len).sum()
    }

    pub fn is_serving_table(&self, table_number: i64) -> bool {
        self.serving_guests_by_table.contains_key(&table_number)
    }
}

/// Aggregate `orders` into status counts, per-guest groups and serving guests.
///
/// Orders without a guest count toward `by_status` only. Orders with a guest
/// but no table join the guest group but no table view. Guest id `0` and
/// table `0` are ordinary ids. A guest's entry under
/// a table holds the guest's full order list (guests moved between tables show
/// all their orders at each table they sat at).
pub fn aggregate_orders(orders: &[Order]) -> OrderAggregation<'_> {
    let mut status_counts = StatusCounts::empty();
    let mut orders_by_guest: BTreeMap<i64, Vec<&Order>> = BTreeMap::new();
    let mut guests_by_table: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();

    for order in orders {
        *status_counts.by_status.entry(order.status).or_default() += 1;

        let Some(guest_id) = order.guest_id else {
            continue;
        };
        orders_by_guest.entry(guest_id).or_default().push(order);

        if let Some(table_number) = order.table_number {
            *status_counts
                .by_table
                .entry(table_number)
                .or_default()
                .entry(guest_id)
                .or_default()
                .entry(order.status)
                .or_default() += 1;
            guests_by_table
                .entry(table_number)
                .or_default()
                .insert(guest_id);
        }
    }

    let mut serving_guests_by_table = BTreeMap::new();
    for (table_number, guests) in guests_by_table {
        let serving: BTreeMap<i64, Vec<&Order>> = guests
            .into_iter()
            .filter_map(|guest_id| {
                let guest_orders = orders_by_guest.get(&guest_id)?;
                guest_orders
                    .iter()
                    .any(|o| o.status.is_serving())
                    .then(|| (guest_id, guest_orders.clone()))
            })
            .collect();
        if !serving.is_empty() {
            serving_guests_by_table.insert(table_number, serving);
        }
    }

    OrderAggregation {
        status_counts,
        orders_by_guest,
        serving_guests_by_table,
    }
}
