//! Messages exchanged with agent clients.
//!
//! - [`AgentCommand`]: what a client (order entry or price feed) sends.
//! - [`OutputMessage`]: what comes back, either as a direct reply or as
//!   a broadcast agent event.

use limit_core::{AgentEvent, Order, OrderId, Side};

/// A request into the agent.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCommand {
    /// Register a new limit order.
    NewOrder(NewOrder),

    /// Market price update for one product.
    PriceTick(PriceTick),

    /// List pending orders for a product.
    QueryOrders { product_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub side: Side,
    pub product_id: String,
    pub quantity: u64,
    pub limit_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceTick {
    pub product_id: String,
    pub price: f64,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAck {
    pub order_id: OrderId,
    pub side: Side,
    pub product_id: String,
    pub quantity: u64,
    pub limit_price: f64,
}

impl From<&Order> for OrderAck {
    fn from(order: &Order) -> Self {
        OrderAck {
            order_id: order.id(),
            side: order.side(),
            product_id: order.product_id().to_string(),
            quantity: order.quantity(),
            limit_price: order.limit_price(),
        }
    }
}

/// Anything the agent side writes back to a client.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMessage {
    /// Order accepted.
    Ack(OrderAck),

    /// Order refused by validation.
    Reject { reason: String },

    /// One pending order, in reply to a query.
    OpenOrder(OrderAck),

    /// Execution outcome from a tick.
    Event(AgentEvent),

    /// Line could not be parsed.
    Error { reason: String },
}

impl OutputMessage {
    /// Direct replies go to the requesting client only; events are for everyone.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, OutputMessage::Event(_))
    }
}

impl From<AgentEvent> for OutputMessage {
    fn from(event: AgentEvent) -> Self {
        OutputMessage::Event(event)
    }
}
