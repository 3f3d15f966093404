// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::LivenessState;

/// Process wide counter, so that each bridge gets a distinct generation.
static BRIDGE_GENERATION: AtomicU32 = AtomicU32::new(0);

/// Tracks whether a bridge's producer thread is still inside its loop.
///
/// Shared (via [`Arc`]) between the producer thread, which flips it exactly once on the
/// way out, and the [`Bridge`] handle, which only reads it.
///
/// [`Arc`]: std::sync::Arc
/// [`Bridge`]: super::Bridge
#[derive(Debug)]
pub struct ProducerLiveness {
    pub is_running: AtomicBool,

    /// Identifies the bridge instance in thread names and log events. Starts at `1`.
    pub generation: u32,
}

impl ProducerLiveness {
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_running: AtomicBool::new(true),
            generation: BRIDGE_GENERATION
                .fetch_add(1, Ordering::SeqCst)
                .wrapping_add(1),
        }
    }

    pub fn mark_terminated(&self) { self.is_running.store(false, Ordering::SeqCst); }

    #[must_use]
    pub fn is_running(&self) -> LivenessState {
        if self.is_running.load(Ordering::SeqCst) {
            LivenessState::Running
        } else {
            LivenessState::Terminated
        }
    }
}

impl Default for ProducerLiveness {
    fn default() -> Self { Self::new() }
}

/// RAII guard that calls [`mark_terminated()`] when the producer loop exits, normally
/// or by unwinding.
///
/// [`mark_terminated()`]: ProducerLiveness::mark_terminated
#[derive(Debug)]
pub struct TerminationGuard<'a> {
    pub liveness: &'a ProducerLiveness,
}

impl Drop for TerminationGuard<'_> {
    fn drop(&mut self) { self.liveness.mark_terminated(); }
}
