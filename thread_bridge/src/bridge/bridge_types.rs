// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words taskthreads

//! Value and error types that cross the bridge. Recoverable failures are reported
//! through [`BridgeError`]. Lifecycle violations are [`DispatchError`]s, which the
//! producer loop turns into a process abort.

/// Result of one blocking [`fetch_next()`] call on the upstream source.
///
/// [`fetch_next()`]: super::RecordFetcher::fetch_next
#[derive(Debug)]
pub enum Fetched<R> {
    /// A record, whose ownership moves into the bridge.
    Record(R),
    /// The stream is over. Either it ended, or a stop request was honored.
    EndMarker,
    /// The upstream broke. The stream ends and the completion reports
    /// [`BridgeError::UpstreamFailed`].
    Failed(miette::Report),
}

/// Why the producer loop exited. This is the return value of the producer thread, so
/// the finalizer receives it from [`JoinHandle::join()`].
///
/// [`JoinHandle::join()`]: std::thread::JoinHandle::join
#[derive(Debug)]
pub enum ProducerExit {
    EndOfStream {
        records_delivered: u64,
    },
    UpstreamFailed {
        records_delivered: u64,
        report: miette::Report,
    },
}

/// Success value of a [`CompletionHandle`].
///
/// [`CompletionHandle`]: super::CompletionHandle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSummary {
    /// Number of handler invocations that ran to completion.
    pub records_delivered: u64,
    /// See [`ProducerLiveness::generation`].
    ///
    /// [`ProducerLiveness::generation`]: super::ProducerLiveness::generation
    pub generation: u32,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum BridgeError {
    #[error("Failed to start the upstream source: {0}")]
    #[diagnostic(code(r3bl_thread_bridge::upstream_start))]
    UpstreamStart(miette::Report),

    #[error("Failed to spawn the bridge producer thread")]
    #[diagnostic(code(r3bl_thread_bridge::thread_spawn))]
    #[cfg_attr(
        target_os = "linux",
        diagnostic(help(
            "The system may have reached its thread limit - \
             check `ulimit -u` for per-user limit, \
             `cat /proc/sys/kernel/threads-max` for system-wide limit"
        ))
    )]
    #[cfg_attr(
        target_os = "macos",
        diagnostic(help(
            "The system may have reached its thread limit - \
             check `ulimit -u` for per-user limit, \
             `sysctl kern.num_taskthreads` for per-process limit"
        ))
    )]
    ThreadSpawn(#[source] std::io::Error),

    #[error("Upstream source failed after {records_delivered} records: {report}")]
    #[diagnostic(code(r3bl_thread_bridge::upstream_failed))]
    UpstreamFailed {
        records_delivered: u64,
        report: miette::Report,
    },

    #[error("Bridge producer thread panicked: {message}")]
    #[diagnostic(
        code(r3bl_thread_bridge::producer_panicked),
        help("The upstream source panicked inside `fetch_next()`.")
    )]
    ProducerPanicked { message: String },

    #[error("Bridge consumer context was dropped before the stream finished")]
    #[diagnostic(
        code(r3bl_thread_bridge::consumer_dropped),
        help(
            "Keep the `LocalSet` that `create_bridge()` was called in running until \
             the completion resolves."
        )
    )]
    ConsumerDropped,
}

/// A push into the safe call queue did not complete. Both variants mean the queue is
/// used outside of its lifecycle, so the producer loop never tries to recover from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum DispatchError {
    #[error("The consumer side of the safe call queue is gone")]
    #[diagnostic(code(r3bl_thread_bridge::dispatch::consumer_gone))]
    ConsumerGone,

    #[error("The handler invocation was dropped before it completed")]
    #[diagnostic(code(r3bl_thread_bridge::dispatch::handler_aborted))]
    HandlerAborted,
}
