//! In-memory store of limit orders.
//!
//! - Orders are kept in insertion order; that order is also the
//!   evaluation order for a tick.
//! - Ids are dense (`1..=len`), so lookups are a direct index.
//! - Scans are linear per tick. A larger deployment would index pending
//!   orders per product and keep a price-ordered map per side.
//!
//! Status changes are crate-private: only the agent's execution path
//! claims, releases and fills orders.

use crate::error::OrderError;
use crate::order::{Order, OrderId, OrderStatus};
use crate::side::Side;

#[derive(Debug, Clone)]
struct Slot {
    order: Order,

    /// Set while a backend call for this order is outstanding.
    in_flight: bool,
}

impl Slot {
    fn is_open(&self) -> bool {
        self.order.status == OrderStatus::Pending && !self.in_flight
    }
}

/// Flat collection of orders and their fill status.
#[derive(Debug, Default)]
pub struct OrderStore {
    slots: Vec<Slot>,
}

impl OrderStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        OrderStore::default()
    }

    /// Construct a pending order and append it.
    ///
    /// Rejects zero quantities, non-positive or non-finite limit prices
    /// and blank product ids.
    pub fn add_order(
        &mut self,
        side: Side,
        product_id: impl Into<String>,
        quantity: u64,
        limit_price: f64,
    ) -> Result<OrderId, OrderError> {
        let product_id = product_id.into();

        if product_id.trim().is_empty() {
            return Err(OrderError::EmptyProduct);
        }
        if quantity == 0 {
            return Err(OrderError::ZeroQuantity);
        }
        if !limit_price.is_finite() || limit_price <= 0.0 {
            return Err(OrderError::InvalidLimitPrice(limit_price));
        }

        let id = OrderId(self.slots.len() as u64 + 1);
        self.slots.push(Slot {
            order: Order::new(id, side, product_id, quantity, limit_price),
            in_flight: false,
        });
        Ok(id)
    }

    /// Pending orders for `product_id`, in insertion order.
    ///
    /// Orders with a backend call in flight are skipped.
    pub fn pending_orders_for<'a>(&'a self, product_id: &'a str) -> impl Iterator<Item = &'a Order> + 'a {
        self.slots
            .iter()
            .filter(move |slot| slot.is_open() && slot.order.product_id == product_id)
            .map(|slot| &slot.order)
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.slot(id).map(|slot| &slot.order)
    }

    /// All orders, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.slots.iter().map(|slot| &slot.order)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of orders not yet executed (including in-flight ones).
    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.order.status == OrderStatus::Pending)
            .count()
    }

    // -------------------------------------------------------------------------
    // Execution path (agent only)
    // -------------------------------------------------------------------------

    /// Mark a pending order as in flight. Returns `false` if it is already
    /// executed or claimed.
    pub(crate) fn claim(&mut self, id: OrderId) -> bool {
        match self.slot_mut(id) {
            Some(slot) if slot.is_open() => {
                slot.in_flight = true;
                true
            }
            _ => false,
        }
    }

    /// Drop the in-flight mark after a failed execution; the order stays pending.
    pub(crate) fn release(&mut self, id: OrderId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.in_flight = false;
        }
    }

    /// Commit a successful execution. Returns `false` if the order was not
    /// a claimed pending order.
    pub(crate) fn mark_executed(&mut self, id: OrderId) -> bool {
        match self.slot_mut(id) {
            Some(slot) if slot.in_flight && slot.order.status == OrderStatus::Pending => {
                slot.in_flight = false;
                slot.order.status = OrderStatus::Executed;
                true
            }
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn index(id: OrderId) -> Option<usize> {
        (id.0 as usize).checked_sub(1)
    }

    fn slot(&self, id: OrderId) -> Option<&Slot> {
        Self::index(id).and_then(|i| self.slots.get(i))
    }

    fn slot_mut(&mut self, id: OrderId) -> Option<&mut Slot> {
        Self::index(id).and_then(|i| self.slots.get_mut(i))
    }
}
