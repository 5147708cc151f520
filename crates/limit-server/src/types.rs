//! Shared types for the limit-order TCP server.
//!
//! This module defines:
//! - `ClientId`: a lightweight handle for connected clients
//! - channel aliases between clients and the agent loop
//! - `AgentRequest`: commands flowing from clients to the agent
//! - `ServerAgent`: the concrete agent the server runs

use std::collections::HashMap;
use std::sync::Arc;

use limit_core::{EventLog, LimitOrderAgent, TracingSink};
use limit_protocol::{AgentCommand, OutputMessage};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

use crate::backend::PaperBackend;

/// Identifier for a connected client.
///
/// This is intentionally opaque; we just guarantee uniqueness
/// over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Outbound messages from the agent loop to a given client.
pub type OutboundTx = mpsc::UnboundedSender<OutputMessage>;
pub type OutboundRx = mpsc::UnboundedReceiver<OutputMessage>;

/// Registry of connected clients and their outbound channels.
pub type ClientRegistry = Arc<RwLock<HashMap<ClientId, OutboundTx>>>;

/// Command flowing from a client task into the central agent task.
#[derive(Debug)]
pub struct AgentRequest {
    pub client_id: ClientId,
    pub cmd: AgentCommand,
}

/// Channel from clients → agent task.
pub type AgentTx = mpsc::UnboundedSender<AgentRequest>;
pub type AgentRx = mpsc::UnboundedReceiver<AgentRequest>;

/// Events are logged, then buffered until the agent loop broadcasts them.
pub type ServerSink = (TracingSink, EventLog);

pub type ServerAgent = LimitOrderAgent<PaperBackend, ServerSink>;
