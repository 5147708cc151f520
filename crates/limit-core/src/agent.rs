//! Limit order agent.
//!
//! Owns an [`OrderStore`], reacts to price ticks and triggers executions
//! through an [`ExecutionBackend`]:
//! - On each tick, pending orders for the ticked product are scanned in
//!   insertion order and checked against their limit.
//! - Each favorable order gets exactly one backend call. Success marks it
//!   executed; failure leaves it pending for a later tick.
//! - Every outcome is reported to an [`EventSink`].
//!
//! Ticks may be delivered from several threads. Favorable orders are
//! claimed under the store lock, the lock is released for the backend
//! call, and the outcome is committed under a second short lock. A
//! claimed order is invisible to other ticks, so it cannot execute twice.

use std::sync::{Mutex, MutexGuard};

use crate::error::OrderError;
use crate::events::{AgentEvent, EventSink, TracingSink};
use crate::execution::ExecutionBackend;
use crate::order::{Order, OrderId};
use crate::order_store::OrderStore;
use crate::side::Side;

/// Outcome of a single [`LimitOrderAgent::on_price_tick`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pending orders for the product that were checked against the price.
    pub evaluated: usize,

    /// Orders filled on this tick, in evaluation order.
    pub executed: Vec<OrderId>,

    /// Orders whose backend call failed; they are still pending.
    pub failed: Vec<OrderId>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.executed.is_empty() && self.failed.is_empty()
    }
}

/// Watches price ticks and fires limit orders against a backend.
#[derive(Debug)]
pub struct LimitOrderAgent<B, S = TracingSink> {
    backend: B,
    sink: S,
    store: Mutex<OrderStore>,
}

impl<B: ExecutionBackend> LimitOrderAgent<B, TracingSink> {
    /// Create an agent that reports events through `tracing`.
    pub fn new(backend: B) -> Self {
        LimitOrderAgent::with_sink(backend, TracingSink)
    }
}

impl<B: ExecutionBackend, S: EventSink> LimitOrderAgent<B, S> {
    pub fn with_sink(backend: B, sink: S) -> Self {
        LimitOrderAgent {
            backend,
            sink,
            store: Mutex::new(OrderStore::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Register a new pending limit order.
    pub fn add_order(
        &self,
        side: Side,
        product_id: impl Into<String>,
        quantity: u64,
        limit_price: f64,
    ) -> Result<OrderId, OrderError> {
        let product_id = product_id.into();
        let id = self.lock_store().add_order(side, product_id.as_str(), quantity, limit_price)?;

        tracing::debug!(
            order_id = id.0,
            %side,
            product = %product_id,
            quantity,
            limit_price,
            "order added"
        );
        Ok(id)
    }

    /// Handle a market price update for `product_id`.
    ///
    /// Execution failures are contained to their order: they are reported
    /// to the sink and never returned from here.
    pub fn on_price_tick(&self, product_id: &str, price: f64) -> TickReport {
        let mut report = TickReport::default();

        let claimed: Vec<Order> = {
            let mut store = self.lock_store();

            let mut favorable = Vec::new();
            for order in store.pending_orders_for(product_id) {
                report.evaluated += 1;
                if order.is_favorable(price) {
                    favorable.push(order.clone());
                }
            }

            favorable.retain(|order| store.claim(order.id()));
            favorable
        };

        tracing::debug!(
            product = product_id,
            price,
            evaluated = report.evaluated,
            triggered = claimed.len(),
            "price tick"
        );

        // Guard every claim before the first backend call, so a panic on
        // one order releases the ones after it too.
        let claims: Vec<Claim<'_>> = claimed
            .iter()
            .map(|order| Claim::new(&self.store, order.id()))
            .collect();

        for (order, mut claim) in claimed.iter().zip(claims) {
            match self
                .backend
                .execute(order.side(), order.product_id(), order.quantity())
            {
                Ok(()) => {
                    if claim.commit() {
                        report.executed.push(order.id());
                        self.sink.on_event(&AgentEvent::executed(order, price));
                    } else {
                        tracing::error!(order_id = order.id().0, "executed order lost its claim");
                    }
                }
                Err(err) => {
                    drop(claim);
                    report.failed.push(order.id());
                    self.sink
                        .on_event(&AgentEvent::execution_failed(order, err.to_string()));
                }
            }
        }

        report
    }

    /// Snapshot of a single order.
    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.lock_store().get(id).cloned()
    }

    /// Snapshot of every order, in insertion order.
    pub fn orders(&self) -> Vec<Order> {
        self.lock_store().iter().cloned().collect()
    }

    /// Snapshot of the pending orders for one product.
    pub fn pending_orders_for(&self, product_id: &str) -> Vec<Order> {
        self.lock_store()
            .pending_orders_for(product_id)
            .cloned()
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.lock_store().pending_count()
    }

    fn lock_store(&self) -> MutexGuard<'_, OrderStore> {
        lock(&self.store)
    }
}

// Store mutations are single-step, so a poisoned lock still guards a
// consistent store.
fn lock(store: &Mutex<OrderStore>) -> MutexGuard<'_, OrderStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-flight mark on one order. Released on drop unless committed, so a
/// failed or panicking backend call leaves the order pending.
struct Claim<'a> {
    store: &'a Mutex<OrderStore>,
    id: OrderId,
    armed: bool,
}

impl<'a> Claim<'a> {
    fn new(store: &'a Mutex<OrderStore>, id: OrderId) -> Self {
        Claim {
            store,
            id,
            armed: true,
        }
    }

    fn commit(&mut self) -> bool {
        self.armed = false;
        lock(self.store).mark_executed(self.id)
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.store).release(self.id);
        }
    }
}
