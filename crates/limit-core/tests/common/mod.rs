// Shared test doubles for limit-core integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use limit_core::{ExecutionBackend, ExecutionError, Side};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub side: Side,
    pub product_id: String,
    pub quantity: u64,
}

impl Call {
    pub fn buy(product_id: &str, quantity: u64) -> Self {
        Call {
            side: Side::Buy,
            product_id: product_id.to_string(),
            quantity,
        }
    }

    pub fn sell(product_id: &str, quantity: u64) -> Self {
        Call {
            side: Side::Sell,
            product_id: product_id.to_string(),
            quantity,
        }
    }
}

/// Records every call; fails them while `failing` is set.
#[derive(Debug, Default)]
pub struct MockBackend {
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend::default()
    }

    pub fn failing() -> Self {
        let backend = MockBackend::default();
        backend.set_failing(true);
        backend
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn buys(&self) -> Vec<Call> {
        self.calls_for(Side::Buy)
    }

    pub fn sells(&self) -> Vec<Call> {
        self.calls_for(Side::Sell)
    }

    fn calls_for(&self, side: Side) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.side == side).collect()
    }

    fn record(&self, side: Side, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        self.calls.lock().unwrap().push(Call {
            side,
            product_id: product_id.to_string(),
            quantity,
        });

        if self.failing.load(Ordering::SeqCst) {
            Err(ExecutionError::rejected("Execution error"))
        } else {
            Ok(())
        }
    }
}

impl ExecutionBackend for MockBackend {
    fn buy(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        self.record(Side::Buy, product_id, quantity)
    }

    fn sell(&self, product_id: &str, quantity: u64) -> Result<(), ExecutionError> {
        self.record(Side::Sell, product_id, quantity)
    }
}
