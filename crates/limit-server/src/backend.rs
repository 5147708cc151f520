//! Paper execution backend.
//!
//! Fills every execution in-process, except:
//! - quantities above `max_order_qty`
//! - products listed as halted
//!
//! which are rejected with [`ExecutionError::Rejected`].

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use limit_core::{ExecutionBackend, ExecutionError, Side};

use crate::config::Config;

#[derive(Debug)]
pub struct PaperBackend {
    max_order_qty: u64,
    halted: HashSet<String>,
    fills: AtomicU64,
}

impl PaperBackend {
    pub fn new(max_order_qty: u64, halted: impl IntoIterator<Item = String>) -> Self {
        PaperBackend {
            max_order_qty,
            halted: halted.into_iter().collect(),
            fills: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        PaperBackend::new(config.max_order_qty, config.halted_products.iter().cloned())
    }

    /// Number of executions filled so far.
    pub fn fills(&self) -> u64 {
        self.fills.load(Ordering::Relaxed)
    }

    fn fill(&self, side: Side, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        if self.halted.contains(product_id) {
            return Err(ExecutionError::rejected(format!("{} is halted", product_id)));
        }
        if quantity > self.max_order_qty {
            return Err(ExecutionError::rejected(format!(
                "quantity {} exceeds limit {}",
                quantity, self.max_order_qty
            )));
        }

        self.fills.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(%side, product = product_id, quantity, "paper fill");
        Ok(())
    }
}

impl ExecutionBackend for PaperBackend {
    fn buy(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        self.fill(Side::Buy, product_id, quantity)
    }

    fn sell(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        self.fill(Side::Sell, product_id, quantity)
    }
}
