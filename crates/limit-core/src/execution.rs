//! Execution backend capability.
//!
//! The agent never places trades itself; it calls an [`ExecutionBackend`]
//! once per favorable tick and observes success or failure. Retries,
//! connectivity and settlement belong to the backend.

use std::sync::Arc;

use crate::error::ExecutionError;
use crate::side::Side;

/// Something that can buy or sell a quantity of a product.
///
/// Implementations must be shareable across threads since the agent
/// may be ticked concurrently.
pub trait ExecutionBackend: Send + Sync {
    fn buy(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError>;

    fn sell(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError>;

    /// Dispatch on `side`.
    fn execute(&self, side: Side, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        match side {
            Side::Buy => self.buy(product_id, quantity),
            Side::Sell => self.sell(product_id, quantity),
        }
    }
}

impl<T: ExecutionBackend + ?Sized> ExecutionBackend for &T {
    fn buy(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        (**self).buy(product_id, quantity)
    }

    fn sell(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        (**self).sell(product_id, quantity)
    }
}

impl<T: ExecutionBackend + ?Sized> ExecutionBackend for Arc<T> {
    fn buy(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        (**self).buy(product_id, quantity)
    }

    fn sell(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        (**self).sell(product_id, quantity)
    }
}

impl<T: ExecutionBackend + ?Sized> ExecutionBackend for Box<T> {
    fn buy(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        (**self).buy(product_id, quantity)
    }

    fn sell(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        (**self).sell(product_id, quantity)
    }
}
