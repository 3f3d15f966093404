// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cross thread, single consumer dispatch. Any thread holding the [`SafeCallSender`]
//! can push a record; the consumer awaits [`SafeCallReceiver::recv()`] and runs the
//! handler with [`SafeCall::invoke()`]. The push does not return until that invocation
//! has finished.
//!
//! ```text
//! producer thread                          consumer (LocalSet)
//! ───────────────                          ───────────────────
//! blocking_call(record)
//!   ├─ tx.send(SafeCall { record, done }) ──▶ recv().await
//!   │                                         invoke(handler)
//!   │                                           ├─ handler.handle(record)
//!   └─ done_rx.blocking_recv() ◀──────────────  └─ done.send(())
//! ```
//!
//! The queue itself is unbounded, but because of the handshake there is never more than
//! one record in it.
//!
//! There is exactly one sender and it is not [`Clone`]. Dropping it, explicitly with
//! [`SafeCallSender::release()`] or implicitly while unwinding, closes the queue. The
//! receiver then drains what is left and [`recv()`] returns [`None`], which is the
//! signal to finalize.
//!
//! [`recv()`]: SafeCallReceiver::recv

use tokio::sync::{mpsc, oneshot};

use super::{DispatchError, RecordHandler};

/// Creates a queue with its single sender.
#[must_use]
pub fn safe_call_queue<R>() -> (SafeCallSender<R>, SafeCallReceiver<R>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SafeCallSender { tx }, SafeCallReceiver { rx })
}

/// One pending handler invocation. Owns the record until [`invoke()`] hands it to the
/// handler.
///
/// [`invoke()`]: Self::invoke
#[derive(Debug)]
pub struct SafeCall<R> {
    record: R,
    done: oneshot::Sender<()>,
}

impl<R> SafeCall<R> {
    /// Runs the handler with the record, then releases the blocked producer. If the
    /// handler panics, `done` is dropped unsent and the producer sees
    /// [`DispatchError::HandlerAborted`].
    pub fn invoke(self, handler: &mut impl RecordHandler<R>) {
        let Self { record, done } = self;
        handler.handle(record);
        // Nobody is waiting only if the producer thread is already gone.
        drop(done.send(()));
    }
}

#[derive(Debug)]
pub struct SafeCallSender<R> {
    tx: mpsc::UnboundedSender<SafeCall<R>>,
}

impl<R> SafeCallSender<R> {
    /// Push `record` and block the calling thread until the handler invocation for it
    /// has returned on the consumer side.
    ///
    /// Must not be called from inside an async runtime, since it parks the thread.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::ConsumerGone`] if the receiver has been dropped. The record is
    ///   dropped with the rejected message.
    /// - [`DispatchError::HandlerAborted`] if the invocation was dropped without
    ///   completing (receiver dropped with the call still queued, or the handler
    ///   panicked).
    pub fn blocking_call(&self, record: R) -> Result<(), DispatchError> {
        let (done, done_rx) = oneshot::channel();
        self.tx
            .send(SafeCall { record, done })
            .map_err(|_| DispatchError::ConsumerGone)?;
        done_rx
            .blocking_recv()
            .map_err(|_| DispatchError::HandlerAborted)
    }

    /// Give up this sender. Since it is the only one, this closes the queue and lets
    /// the consumer finalize.
    pub fn release(self) { drop(self); }
}

#[derive(Debug)]
pub struct SafeCallReceiver<R> {
    rx: mpsc::UnboundedReceiver<SafeCall<R>>,
}

impl<R> SafeCallReceiver<R> {
    /// Next pending invocation, or [`None`] once the sender has been released and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<SafeCall<R>> { self.rx.recv().await }
}
