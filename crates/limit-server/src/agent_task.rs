//! Central agent loop.
//!
//! This task owns the `LimitOrderAgent` and processes all
//! `AgentRequest`s coming from clients, one at a time. Clients
//! therefore see ticks serialized in arrival order.
//!
//! Routing policy:
//! - `Ack`, `Reject`, `OpenOrder`: sent **only** to the originating client.
//! - execution events (`Executed`, `ExecutionFailed`): broadcast to
//!   **all** connected clients.

use std::collections::HashMap;

use limit_protocol::{dispatch, OutputMessage};

use crate::types::{AgentRequest, AgentRx, ClientId, ClientRegistry, OutboundTx, ServerAgent};

/// Run the central agent processing loop until every sender is gone.
pub async fn run_agent_loop(agent: ServerAgent, mut agent_rx: AgentRx, clients: ClientRegistry) {
    while let Some(req) = agent_rx.recv().await {
        let AgentRequest { client_id, cmd } = req;

        let mut outputs = dispatch(&agent, cmd);
        outputs.extend(agent.sink().1.drain().into_iter().map(OutputMessage::from));

        if outputs.is_empty() {
            continue;
        }

        // Snapshot of current clients to minimize lock hold time.
        let current_clients = {
            let guard = clients.read().await;
            guard.clone()
        };

        for out in outputs {
            route_output(client_id, out, &current_clients);
        }
    }

    tracing::info!(
        orders = agent.orders().len(),
        pending = agent.pending_count(),
        fills = agent.backend().fills(),
        "agent loop shutting down (agent_rx closed)"
    );
}

/// Route a single `OutputMessage` to the appropriate client(s).
fn route_output(
    origin_client: ClientId,
    msg: OutputMessage,
    clients: &HashMap<ClientId, OutboundTx>,
) {
    if msg.is_broadcast() {
        for tx in clients.values() {
            let _ = tx.send(msg.clone());
        }
    } else if let Some(tx) = clients.get(&origin_client) {
        let _ = tx.send(msg);
    }
}
