//! limit-core
//!
//! Pure limit-order agent logic:
//! - side and order representation
//! - order store (pending / executed)
//! - execution backend capability
//! - agent events and observers
//! - the agent that turns price ticks into executions

pub mod side;
pub mod order;
pub mod order_store;
pub mod execution;
pub mod events;
pub mod agent;
pub mod error;

pub use side::Side;
pub use order::{Order, OrderId, OrderStatus};
pub use order_store::OrderStore;
pub use execution::ExecutionBackend;

pub use events::{
    AgentEvent,
    EventLog,
    EventSink,
    Executed,
    ExecutionFailed,
    TracingSink,
};

pub use agent::{LimitOrderAgent, TickReport};
pub use error::{ExecutionError, OrderError};
