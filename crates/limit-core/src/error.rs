//! Error types for the limit-order core.
//!
//! - [`OrderError`]: an order was refused at insertion time.
//! - [`ExecutionError`]: the execution backend could not place a trade.
//!
//! Only `ExecutionError` is recovered inside the agent; the order that
//! hit it simply stays pending.

use thiserror::Error;

/// Reasons an order is refused by [`crate::OrderStore::add_order`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    /// Quantity must be at least one unit.
    #[error("quantity must be positive")]
    ZeroQuantity,

    /// Limit price must be a finite value above zero.
    #[error("limit price must be positive and finite, got {0}")]
    InvalidLimitPrice(f64),

    /// Product identifier is empty or whitespace.
    #[error("product id must not be empty")]
    EmptyProduct,
}

/// Failure reported by an [`crate::ExecutionBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The venue refused the trade (limits, halted product, funds...).
    #[error("execution rejected: {0}")]
    Rejected(String),

    /// The venue could not be reached or did not answer in time.
    #[error("execution backend unavailable: {0}")]
    Unavailable(String),
}

impl ExecutionError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        ExecutionError::Rejected(reason.into())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ExecutionError::Unavailable(reason.into())
    }
}
