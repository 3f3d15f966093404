// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Thread bridge
//!
//! Some upstreams only offer a **blocking** API: a proxy's flow hook, a C library's
//! `next()` call, a socket read. Calling them from an [async task] stalls every other
//! task on that thread. The thread bridge moves the blocking calls onto a dedicated
//! producer thread, and delivers each record to a handler that runs inside a
//! single-threaded [`tokio`] consumer context ([`LocalSet`]).
//!
//! # Guarantees
//!
//! - **Exactly once, in order.** Every fetched record is handed to the handler exactly
//!   once, in fetch order. The handler owns the record and frees it.
//! - **Backpressure of one.** The producer blocks inside each push until the handler
//!   invocation for that record has returned. It is never more than one record ahead.
//! - **One completion.** The [`CompletionHandle`] resolves exactly once, after the
//!   producer thread has been joined. No handler runs after that.
//! - **No locks.** The producer and consumer share no mutable state. The only hand-off
//!   is the queue closing, followed by the join.
//!
//! # Lifecycle
//!
//! ```text
//! caller (LocalSet)               producer thread                consumer task
//! ─────────────────               ───────────────                ─────────────
//! create_bridge()
//!   ├─ safe_call_queue()
//!   ├─ spawn_local ─────────────────────────────────────────────▶ recv().await
//!   ├─ source.start() ──▶ (fetcher, stopper)
//!   ├─ spawn ──────────────────▶ loop {
//!   │                              fetch_next()
//!   │                              ├─ Record ── blocking_call ──▶ handler(record)
//!   │                              │            (blocked) ◀────── done
//!   │                              ├─ EndMarker ─┐
//!   │                              └─ Failed ────┤
//!   │                            }               ▼
//!   │                            fetcher drops
//!   │                            TerminationGuard drops
//!   │                            sender.release() ────────────▶ recv() == None
//!   │                            thread returns                  finalize():
//!   │                                                              join producer
//!   └─ bridge.await ◀──────────────────────────────────────────── resolve completion
//! ```
//!
//! # Stopping
//!
//! [`StopHandle::request_stop()`] forwards to the upstream's [`UpstreamStopper`] and
//! returns. It never joins and never touches the queue. The upstream makes its next (or
//! pending) fetch return [`Fetched::EndMarker`], and from there the normal end-of-stream
//! path runs. A stop requested from inside the handler works the same way: the handler
//! returns, the producer unblocks, fetches, sees the end marker, and releases.
//!
//! # Lifecycle violations
//!
//! If the consumer side disappears while the producer still holds its sender (the
//! [`LocalSet`] is dropped, or the handler panics), the producer's push fails with a
//! [`DispatchError`]. There is no recovery from this: the producer logs it, prints a
//! line starting with [`FATAL_DISPATCH_FAILURE`] to stderr, and aborts the process.
//!
//! [`LocalSet`]: tokio::task::LocalSet
//! [async task]: tokio::task

// Attach sources.
mod bridge_completion;
mod bridge_config;
mod bridge_context;
mod bridge_di_traits;
mod bridge_handle;
mod bridge_liveness;
mod bridge_producer;
mod bridge_types;
mod channel_upstream;
mod safe_call_queue;

// Re-export.
pub use bridge_completion::*;
pub use bridge_config::*;
pub use bridge_context::*;
pub use bridge_di_traits::*;
pub use bridge_handle::*;
pub use bridge_liveness::*;
pub use bridge_producer::*;
pub use bridge_types::*;
pub use channel_upstream::*;
pub use safe_call_queue::*;

#[cfg(test)]
mod tests;
