// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The loop that runs on the dedicated producer thread.

use std::sync::Arc;

use super::{DispatchError, Fetched, ProducerExit, ProducerLiveness, RecordFetcher,
            SafeCallSender, TerminationGuard};
use crate::Continuation;

/// Prefix of the line printed to stderr right before the process aborts.
pub const FATAL_DISPATCH_FAILURE: &str = "thread bridge: fatal dispatch failure";

/// Fetches and pushes records until the upstream returns [`Fetched::EndMarker`] or
/// [`Fetched::Failed`], then releases the queue sender.
///
/// Called from the spawned producer thread. Exit order matters:
/// 1. the fetcher is dropped,
/// 2. [`TerminationGuard`] marks the liveness terminated,
/// 3. the sender is released, which is what lets the consumer finalize.
///
/// The same order holds while unwinding if [`fetch_next()`] panics: locals drop in
/// reverse declaration order, and `sender` is a parameter, so it goes last.
///
/// A [`DispatchError`] never returns from here, see [`fatal_dispatch_failure()`].
///
/// [`fetch_next()`]: RecordFetcher::fetch_next
pub fn run_producer_loop<F>(
    fetcher: F,
    sender: SafeCallSender<F::Record>,
    liveness: Arc<ProducerLiveness>,
) -> ProducerExit
where
    F: RecordFetcher,
{
    let generation = liveness.generation;
    let termination_guard = TerminationGuard {
        liveness: &liveness,
    };

    tracing::debug!(message = "bridge producer: started", generation);

    let mut producer = Producer {
        fetcher,
        generation,
        records_delivered: 0,
        exit: None,
    };
    while producer.poll_once(&sender) == Continuation::Continue {}

    let Producer {
        fetcher,
        records_delivered,
        exit,
        ..
    } = producer;
    let exit = exit.unwrap_or(ProducerExit::EndOfStream { records_delivered });

    // The finalizer joins this thread on the consumer thread, so the fetcher's `Drop`
    // must be done before the queue closes.
    drop(fetcher);
    drop(termination_guard);
    tracing::debug!(message = "bridge producer: releasing queue", generation, ?exit);
    sender.release();

    exit
}

struct Producer<F: RecordFetcher> {
    fetcher: F,
    generation: u32,
    records_delivered: u64,
    /// Set right before [`poll_once()`] returns [`Continuation::Stop`].
    ///
    /// [`poll_once()`]: Self::poll_once
    exit: Option<ProducerExit>,
}

impl<F: RecordFetcher> Producer<F> {
    fn poll_once(&mut self, sender: &SafeCallSender<F::Record>) -> Continuation {
        match self.fetcher.fetch_next() {
            Fetched::Record(record) => {
                if let Err(err) = sender.blocking_call(record) {
                    fatal_dispatch_failure(&err, self.generation);
                }
                self.records_delivered += 1;
                Continuation::Continue
            }
            Fetched::EndMarker => {
                self.exit = Some(ProducerExit::EndOfStream {
                    records_delivered: self.records_delivered,
                });
                Continuation::Stop
            }
            Fetched::Failed(report) => {
                tracing::debug!(
                    message = "bridge producer: upstream failed",
                    generation = self.generation,
                    error = %report
                );
                self.exit = Some(ProducerExit::UpstreamFailed {
                    records_delivered: self.records_delivered,
                    report,
                });
                Continuation::Stop
            }
        }
    }
}

/// A failed push means the queue was torn down while the producer still owned a
/// sender. Shared state may already be gone, so the process aborts instead of
/// unwinding.
pub fn fatal_dispatch_failure(err: &DispatchError, generation: u32) -> ! {
    tracing::error!(
        message = "bridge producer: dispatch failed, aborting",
        generation,
        error = %err
    );
    eprintln!("{FATAL_DISPATCH_FAILURE} (bridge generation {generation}): {err}");
    std::process::abort()
}
