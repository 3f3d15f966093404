// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Traits that let you plug your upstream source and your handler into the bridge,
//! using [dependency injection]. The bridge doesn't know what protocol the upstream
//! speaks or what a record contains.
//!
//! | Trait                | Runs on                  | Provides                      |
//! | :------------------- | :----------------------- | :---------------------------- |
//! | [`UpstreamSource`]   | caller, once             | starts the stream             |
//! | [`RecordFetcher`]    | producer thread          | blocking fetch of next record |
//! | [`UpstreamStopper`]  | any thread               | cooperative stop request      |
//! | [`RecordHandler`]    | consumer (`LocalSet`)    | does something with a record  |
//!
//! [dependency injection]: https://en.wikipedia.org/wiki/Dependency_injection

use super::Fetched;

/// Entry point for an upstream. [`start()`] is called exactly once per bridge, by
/// [`create_bridge()`], and splits the upstream into a coupled pair:
///
/// - a [`RecordFetcher`], moved into the producer thread,
/// - an [`UpstreamStopper`], kept by the caller in a [`StopHandle`].
///
/// They are created together because a stop request only works if it can unblock the
/// fetcher's pending call (e.g. by closing the channel or socket it is blocked on).
///
/// [`StopHandle`]: super::StopHandle
/// [`create_bridge()`]: super::create_bridge
/// [`start()`]: Self::start
pub trait UpstreamSource: Send + 'static {
    type Record: Send + 'static;

    type Fetcher: RecordFetcher<Record = Self::Record>;

    type Stopper: UpstreamStopper;

    /// Begin producing.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream can't be started. No thread is spawned in this
    /// case, and [`create_bridge()`] returns [`BridgeError::UpstreamStart`].
    ///
    /// [`BridgeError::UpstreamStart`]: super::BridgeError::UpstreamStart
    /// [`create_bridge()`]: super::create_bridge
    fn start(self) -> miette::Result<(Self::Fetcher, Self::Stopper)>;
}

/// The producer thread's only view of upstream state.
pub trait RecordFetcher: Send + 'static {
    type Record: Send + 'static;

    /// Block until the next record is available, the stream ends, or the upstream
    /// fails. Once a stop has been requested through the paired [`UpstreamStopper`],
    /// this must return [`Fetched::EndMarker`] soon, including when it is already
    /// blocked. If it never does, the bridge never completes.
    fn fetch_next(&mut self) -> Fetched<Self::Record>;
}

pub trait UpstreamStopper: Send + Sync + 'static {
    /// Must not block. May be called any number of times, including after the stream
    /// has ended.
    fn stop_upstream(&self);
}

/// Receives records on the consumer thread, one at a time. The producer thread stays
/// blocked until [`handle()`] returns, so this sets the pace of the whole stream and
/// must not block indefinitely. The handler owns each record and frees it.
///
/// Any `FnMut(R)` closure is a handler. It does not have to be [`Send`], but
/// [`create_bridge()`] needs it to be `'static`, since it is moved into a task on the
/// [`LocalSet`].
///
/// [`LocalSet`]: tokio::task::LocalSet
/// [`create_bridge()`]: super::create_bridge
/// [`handle()`]: Self::handle
pub trait RecordHandler<R> {
    fn handle(&mut self, record: R);
}

impl<R, F> RecordHandler<R> for F
where
    F: FnMut(R),
{
    fn handle(&mut self, record: R) { self(record); }
}
