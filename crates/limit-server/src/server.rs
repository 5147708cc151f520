//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections.
//! - Assigns each connection a `ClientId`.
//! - Spawns:
//!   - a per-client task to handle I/O,
//!   - a single central agent task that owns `LimitOrderAgent`.
//!
//! The actual per-client logic and agent loop live in `client`
//! and `agent_task` modules respectively.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use limit_core::{EventLog, LimitOrderAgent, TracingSink};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::agent_task;
use crate::backend::PaperBackend;
use crate::client;
use crate::config::Config;
use crate::types::{AgentRx, AgentTx, ClientId, ClientRegistry, OutboundRx, OutboundTx};

/// Counter for assigning unique `ClientId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    ClientId(id)
}

/// Bind the configured address and run the server.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    serve(listener, config).await
}

/// Run the accept loop on an already bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "listening");

    // Shared registry of clients → outbound channels.
    let clients: ClientRegistry = Arc::new(tokio::sync::RwLock::new(Default::default()));

    // Channel from clients → agent task.
    let (agent_tx, agent_rx): (AgentTx, AgentRx) = mpsc::unbounded_channel();

    // Spawn the central agent task.
    {
        let agent = LimitOrderAgent::with_sink(
            PaperBackend::from_config(&config),
            (TracingSink, EventLog::new()),
        );
        let clients_clone = clients.clone();
        tokio::spawn(async move {
            agent_task::run_agent_loop(agent, agent_rx, clients_clone).await;
        });
    }

    loop {
        let (stream, peer_addr) = listener.accept().await.context("accept failed")?;
        let current_clients = {
            let guard = clients.read().await;
            guard.len()
        };

        if current_clients >= config.max_clients {
            tracing::warn!(
                %peer_addr,
                max_clients = config.max_clients,
                "rejecting connection: max_clients reached"
            );
            // Just drop the stream; client will see connection closed.
            continue;
        }

        let client_id = next_client_id();
        tracing::info!(client = client_id.0, %peer_addr, "accepted connection");

        // Create outbound channel for this client.
        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();

        // Register client.
        {
            let mut guard = clients.write().await;
            guard.insert(client_id, out_tx.clone());
        }

        // Clone handles to move into the client task.
        let clients_clone = clients.clone();
        let agent_tx_clone = agent_tx.clone();

        tokio::spawn(async move {
            match client::run_client(client_id, stream, agent_tx_clone, out_tx, out_rx, clients_clone)
                .await
            {
                Ok(()) => tracing::info!(client = client_id.0, "client disconnected"),
                Err(e) => tracing::warn!(client = client_id.0, error = %e, "client error"),
            }
        });
    }
}
