//! Limit order representation held by the order store.
//!
//! An order carries:
//! - `id` assigned by the store on insertion
//! - `side`, `product_id`
//! - `quantity` (whole units) and `limit_price`
//! - `status` (pending until the agent fills it)
//!
//! Fields are read-only outside this crate; only the agent's execution
//! path moves an order from `Pending` to `Executed`.

use std::fmt;

use crate::side::Side;

/// Handle for an order, unique within one store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a limit order.
///
/// `Pending -> Executed` happens once, after a successful backend call.
/// `Executed` is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Executed,
}

/// A single limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub(crate) id: OrderId,
    pub(crate) side: Side,
    pub(crate) product_id: String,
    pub(crate) quantity: u64,
    pub(crate) limit_price: f64,
    pub(crate) status: OrderStatus,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        side: Side,
        product_id: String,
        quantity: u64,
        limit_price: f64,
    ) -> Self {
        Order {
            id,
            side,
            product_id,
            quantity,
            limit_price,
            status: OrderStatus::Pending,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn limit_price(&self) -> f64 {
        self.limit_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns `true` once the order has been filled.
    pub fn is_executed(&self) -> bool {
        self.status == OrderStatus::Executed
    }

    /// Whether a tick at `price` would trigger this order.
    pub fn is_favorable(&self, price: f64) -> bool {
        self.side.is_favorable(price, self.limit_price)
    }
}
