//! limit-server
//!
//! Multi-client async TCP server for the limit-order agent. Clients
//! submit orders and deliver price ticks over the CSV line protocol.

pub mod backend;
pub mod config;
pub mod types;
pub mod server;

// these are internal modules, not re-exported
mod agent_task;
mod client;
