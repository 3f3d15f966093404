// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;

use super::{BridgeError, BridgeSummary};

pub type CompletionResult = Result<BridgeSummary, BridgeError>;

/// Creates the one-shot completion signal. The sender half goes into the
/// [`BridgeContext`], the receiver half to the caller.
///
/// [`BridgeContext`]: super::BridgeContext
#[must_use]
pub fn completion_signal() -> (oneshot::Sender<CompletionResult>, CompletionHandle) {
    let (tx, rx) = oneshot::channel();
    (tx, CompletionHandle { rx })
}

/// Resolves exactly once, after the finalizer has joined the producer thread.
///
/// - `Ok(summary)` when the stream ended, including empty and stopped streams.
/// - `Err(..)` when the upstream failed, the producer panicked, or the consumer
///   context was dropped before finalization could run
///   ([`BridgeError::ConsumerDropped`]).
///
/// Dropping the handle does not stop anything. The bridge still runs to the end.
#[derive(Debug)]
pub struct CompletionHandle {
    rx: oneshot::Receiver<CompletionResult>,
}

impl Future for CompletionHandle {
    type Output = CompletionResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|it| it.unwrap_or(Err(BridgeError::ConsumerDropped)))
    }
}
