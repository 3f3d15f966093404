// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{future::IntoFuture, sync::Arc};

use tokio::sync::oneshot;

use super::{BridgeConfig, BridgeContext, BridgeError, CompletionHandle, CompletionResult,
            ProducerLiveness, RecordHandler, UpstreamSource, UpstreamStopper,
            completion_signal, run_consumer_loop, run_producer_loop, safe_call_queue};
use crate::LivenessState;

/// Starts `source` and bridges its records to `handler`, with [`BridgeConfig::default()`].
/// See [`create_bridge_with_config()`].
///
/// # Errors
///
/// See [`create_bridge_with_config()`].
///
/// # Panics
///
/// See [`create_bridge_with_config()`].
pub fn create_bridge<U, H>(
    source: U,
    handler: H,
) -> Result<Bridge<U::Stopper>, BridgeError>
where
    U: UpstreamSource,
    H: RecordHandler<U::Record> + 'static,
{
    create_bridge_with_config(source, handler, BridgeConfig::default())
}

/// Spawns the consumer loop on the current [`LocalSet`], starts `source`, and spawns
/// the producer thread. Returns right away; nothing here blocks on the stream.
///
/// In order:
/// 1. A safe call queue with a single sender, and the consumer loop on this thread.
/// 2. [`UpstreamSource::start()`], exactly once.
/// 3. The producer thread, named per [`BridgeConfig::thread_name()`], which owns the
///    sender.
/// 4. The [`BridgeContext`], handed to the consumer loop.
///
/// # Errors
///
/// - [`BridgeError::UpstreamStart`] if the upstream fails to start.
/// - [`BridgeError::ThreadSpawn`] if the OS refuses the thread. The upstream has been
///   asked to stop by the time this returns.
///
/// In both cases the consumer loop sees the queue closed without a context, and exits
/// without invoking the handler.
///
/// # Panics
///
/// If called outside of a [`LocalSet`]. This happens before the upstream is started,
/// so nothing is left running.
///
/// [`LocalSet`]: tokio::task::LocalSet
pub fn create_bridge_with_config<U, H>(
    source: U,
    handler: H,
    config: BridgeConfig,
) -> Result<Bridge<U::Stopper>, BridgeError>
where
    U: UpstreamSource,
    H: RecordHandler<U::Record> + 'static,
{
    let (sender, receiver) = safe_call_queue::<U::Record>();
    let (context_tx, context_rx) = oneshot::channel();
    tokio::task::spawn_local(run_consumer_loop(receiver, handler, context_rx));

    let (fetcher, stopper) = source.start().map_err(BridgeError::UpstreamStart)?;
    let stop_handle = StopHandle {
        stopper: Arc::new(stopper),
    };

    let liveness = Arc::new(ProducerLiveness::new());
    let generation = liveness.generation;

    let spawn_result = {
        let liveness = Arc::clone(&liveness);
        config
            .thread_builder(generation)
            .spawn(move || run_producer_loop(fetcher, sender, liveness))
    };
    let producer_thread = match spawn_result {
        Ok(it) => it,
        Err(err) => {
            stop_handle.request_stop();
            return Err(BridgeError::ThreadSpawn(err));
        }
    };

    tracing::debug!(
        message = "bridge: created",
        generation,
        thread_name = %config.thread_name(generation)
    );

    let (completion_tx, completion) = completion_signal();
    // The consumer task can't have been polled yet, so it is still waiting for this.
    drop(context_tx.send(BridgeContext::new(
        completion_tx,
        producer_thread,
        generation,
    )));

    Ok(Bridge {
        stop_handle,
        completion,
        liveness,
    })
}

/// Caller side handle of a running bridge. Await it (it implements [`IntoFuture`]) to
/// wait for the completion, or split it with [`into_parts()`] to keep requesting stops
/// from elsewhere.
///
/// [`into_parts()`]: Self::into_parts
#[derive(Debug)]
pub struct Bridge<S: UpstreamStopper> {
    stop_handle: StopHandle<S>,
    completion: CompletionHandle,
    liveness: Arc<ProducerLiveness>,
}

impl<S: UpstreamStopper> Bridge<S> {
    /// Ask the upstream to stop. See [`StopHandle::request_stop()`].
    pub fn request_stop(&self) { self.stop_handle.request_stop(); }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle<S> { self.stop_handle.clone() }

    /// [`LivenessState::Terminated`] once the producer loop has exited, which happens
    /// before the completion resolves.
    #[must_use]
    pub fn producer_liveness(&self) -> LivenessState { self.liveness.is_running() }

    #[must_use]
    pub fn generation(&self) -> u32 { self.liveness.generation }

    #[must_use]
    pub fn into_parts(self) -> (StopHandle<S>, CompletionHandle) {
        (self.stop_handle, self.completion)
    }
}

impl<S: UpstreamStopper> IntoFuture for Bridge<S> {
    type Output = CompletionResult;
    type IntoFuture = CompletionHandle;

    fn into_future(self) -> Self::IntoFuture { self.completion }
}

/// Cloneable, [`Send`] + [`Sync`] handle to the upstream's stop switch.
#[derive(Debug)]
pub struct StopHandle<S: UpstreamStopper> {
    stopper: Arc<S>,
}

impl<S: UpstreamStopper> Clone for StopHandle<S> {
    fn clone(&self) -> Self {
        Self {
            stopper: Arc::clone(&self.stopper),
        }
    }
}

impl<S: UpstreamStopper> StopHandle<S> {
    /// Forwards to [`UpstreamStopper::stop_upstream()`]. Does not block, does not join,
    /// and does not touch the bridge's state. The stream ends when the producer's next
    /// (or current) fetch returns the end marker. Calling it again, or after the
    /// completion resolved, is harmless.
    pub fn request_stop(&self) {
        tracing::debug!(message = "bridge: stop requested");
        self.stopper.stop_upstream();
    }
}
