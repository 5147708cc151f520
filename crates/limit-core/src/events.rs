//! Events emitted by the agent, and the observer that receives them.
//!
//! These are **transport-agnostic** logical notifications:
//! - [`AgentEvent::Executed`]: an order was filled by the backend.
//! - [`AgentEvent::ExecutionFailed`]: the backend refused or failed;
//!   the order stays pending.
//!
//! Line encoders live in the `limit-protocol` crate; this module is
//! purely logical.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::order::{Order, OrderId};
use crate::side::Side;

/// Notification produced while handling a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    Executed(Executed),
    ExecutionFailed(ExecutionFailed),
}

/// Successful execution of a limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub order_id: OrderId,
    pub side: Side,
    pub product_id: String,
    pub quantity: u64,
    pub limit_price: f64,

    /// Tick price that triggered the execution.
    pub tick_price: f64,
}

/// Failed execution attempt; the order remains pending.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionFailed {
    pub order_id: OrderId,
    pub side: Side,
    pub product_id: String,
    pub quantity: u64,
    pub limit_price: f64,

    /// Human-readable error detail from the backend.
    pub reason: String,
}

impl AgentEvent {
    pub(crate) fn executed(order: &Order, tick_price: f64) -> Self {
        AgentEvent::Executed(Executed {
            order_id: order.id(),
            side: order.side(),
            product_id: order.product_id().to_string(),
            quantity: order.quantity(),
            limit_price: order.limit_price(),
            tick_price,
        })
    }

    pub(crate) fn execution_failed(order: &Order, reason: impl Into<String>) -> Self {
        AgentEvent::ExecutionFailed(ExecutionFailed {
            order_id: order.id(),
            side: order.side(),
            product_id: order.product_id().to_string(),
            quantity: order.quantity(),
            limit_price: order.limit_price(),
            reason: reason.into(),
        })
    }

    pub fn order_id(&self) -> OrderId {
        match self {
            AgentEvent::Executed(e) => e.order_id,
            AgentEvent::ExecutionFailed(e) => e.order_id,
        }
    }

    pub fn product_id(&self) -> &str {
        match self {
            AgentEvent::Executed(e) => &e.product_id,
            AgentEvent::ExecutionFailed(e) => &e.product_id,
        }
    }
}

impl fmt::Display for AgentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentEvent::Executed(e) => write!(
                f,
                "executed {} order {} for {} units of {} at or better than {}",
                e.side, e.order_id, e.quantity, e.product_id, e.limit_price
            ),
            AgentEvent::ExecutionFailed(e) => write!(
                f,
                "failed to execute {} order {} for {} units of {}: {}",
                e.side, e.order_id, e.quantity, e.product_id, e.reason
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// Observers
// -----------------------------------------------------------------------------

/// Receives every [`AgentEvent`] the agent emits.
///
/// Called synchronously from `on_price_tick`, outside the store lock.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &AgentEvent);
}

/// Discards events.
impl EventSink for () {
    fn on_event(&self, _event: &AgentEvent) {}
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn on_event(&self, event: &AgentEvent) {
        (**self).on_event(event)
    }
}

/// Fan-out: both sinks see every event, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_event(&self, event: &AgentEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&self, event: &AgentEvent) {
        match event {
            AgentEvent::Executed(e) => tracing::info!(
                order_id = e.order_id.0,
                side = %e.side,
                product = %e.product_id,
                quantity = e.quantity,
                limit_price = e.limit_price,
                tick_price = e.tick_price,
                "order executed"
            ),
            AgentEvent::ExecutionFailed(e) => tracing::warn!(
                order_id = e.order_id.0,
                side = %e.side,
                product = %e.product_id,
                quantity = e.quantity,
                limit_price = e.limit_price,
                reason = %e.reason,
                "order execution failed"
            ),
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<AgentEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Copy of the events recorded so far.
    pub fn snapshot(&self) -> Vec<AgentEvent> {
        self.lock().clone()
    }

    /// Remove and return the events recorded so far.
    pub fn drain(&self) -> Vec<AgentEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AgentEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for EventLog {
    fn on_event(&self, event: &AgentEvent) {
        self.lock().push(event.clone());
    }
}
