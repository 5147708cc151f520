//! Applying commands to an agent.
//!
//! [`dispatch`] returns the direct replies for the requesting client.
//! Execution outcomes of a tick are not part of the reply; they reach
//! whoever listens on the agent's `EventSink`.

use limit_core::{EventSink, ExecutionBackend, LimitOrderAgent};

use crate::messages::{AgentCommand, NewOrder, OrderAck, OutputMessage, PriceTick};

/// Apply one command and return its direct replies.
pub fn dispatch<B, S>(agent: &LimitOrderAgent<B, S>, cmd: AgentCommand) -> Vec<OutputMessage>
where
    B: ExecutionBackend,
    S: EventSink,
{
    match cmd {
        AgentCommand::NewOrder(NewOrder {
            side,
            product_id,
            quantity,
            limit_price,
        }) => match agent.add_order(side, product_id.as_str(), quantity, limit_price) {
            Ok(order_id) => vec![OutputMessage::Ack(OrderAck {
                order_id,
                side,
                product_id,
                quantity,
                limit_price,
            })],
            Err(err) => vec![OutputMessage::Reject {
                reason: err.to_string(),
            }],
        },

        AgentCommand::PriceTick(PriceTick { product_id, price }) => {
            agent.on_price_tick(&product_id, price);
            Vec::new()
        }

        AgentCommand::QueryOrders { product_id } => agent
            .pending_orders_for(&product_id)
            .iter()
            .map(|order| OutputMessage::OpenOrder(OrderAck::from(order)))
            .collect(),
    }
}
