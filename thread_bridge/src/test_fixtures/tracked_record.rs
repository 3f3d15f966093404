// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Counts allocations and frees of [`TrackedRecord`]s, standing in for an instrumented
/// allocator.
#[derive(Debug, Default)]
pub struct RecordLedger {
    created: AtomicUsize,
    dropped: AtomicUsize,
    /// Ids in the order they were dropped.
    drop_order: Mutex<Vec<u32>>,
}

impl RecordLedger {
    #[must_use]
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    #[must_use]
    pub fn created(&self) -> usize { self.created.load(Ordering::SeqCst) }

    #[must_use]
    pub fn dropped(&self) -> usize { self.dropped.load(Ordering::SeqCst) }

    #[must_use]
    pub fn live(&self) -> usize { self.created() - self.dropped() }

    /// # Panics
    ///
    /// If the mutex is poisoned.
    #[must_use]
    pub fn drop_order(&self) -> Vec<u32> { self.drop_order.lock().unwrap().clone() }
}

/// A heap owned record that reports its own creation and destruction to a
/// [`RecordLedger`]. Not [`Clone`], so it can only ever be dropped once.
#[derive(Debug)]
pub struct TrackedRecord {
    pub id: u32,
    pub payload: Box<[u8]>,
    ledger: Arc<RecordLedger>,
}

impl TrackedRecord {
    #[must_use]
    pub fn new(id: u32, ledger: &Arc<RecordLedger>) -> Self {
        ledger.created.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            payload: id.to_le_bytes().to_vec().into_boxed_slice(),
            ledger: Arc::clone(ledger),
        }
    }
}

impl Drop for TrackedRecord {
    fn drop(&mut self) {
        if let Ok(mut order) = self.ledger.drop_order.lock() {
            order.push(self.id);
        }
        self.ledger.dropped.fetch_add(1, Ordering::SeqCst);
    }
}
