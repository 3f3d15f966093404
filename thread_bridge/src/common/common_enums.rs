// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Control flow signal for loops and threads.
///
/// Returned by each step of the producer loop (see [`run_producer_loop()`]) to say
/// whether the dedicated thread should fetch again or exit and release its queue sender.
///
/// [`run_producer_loop()`]: crate::bridge::run_producer_loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Continuation {
    /// Continue to the next iteration.
    #[default]
    Continue,

    /// Stop processing and exit the loop/thread.
    Stop,
}

/// Whether a dedicated thread is still executing its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessState {
    Running,
    Terminated,
}
