//! limit-protocol
//!
//! Line-level encoding/decoding for the limit-order agent.
//!
//! This crate turns text lines into [`AgentCommand`]s and agent
//! outcomes ([`OutputMessage`]) back into lines, and applies commands
//! to an agent.
//!
//! - [`messages`]  : command / output types
//! - [`csv_codec`] : comma-separated line format
//! - [`dispatch`]  : applying a command to a `LimitOrderAgent`

pub mod messages;
pub mod csv_codec;
pub mod dispatch;

pub use messages::{AgentCommand, NewOrder, OrderAck, OutputMessage, PriceTick};
pub use csv_codec::{format_output, parse_input_line, ProtocolError};
pub use dispatch::dispatch;
