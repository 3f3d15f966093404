// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A ready made [`UpstreamSource`] for code that already produces records on its own
//! threads (e.g. proxy hooks firing per request): they [`publish()`] into a channel, and
//! the bridge's producer thread blocks on the other end.
//!
//! Stopping works like closing the channel: the fetch that is pending (or the next one)
//! returns [`Fetched::EndMarker`], records that were published but not yet fetched are
//! dropped, and further [`publish()`] calls hand the record back.
//!
//! [`publish()`]: RecordPublisher::publish

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender,
                        error::SendError};

use super::{Fetched, RecordFetcher, UpstreamSource, UpstreamStopper};

#[derive(Debug)]
enum UpstreamMsg<R> {
    Record(R),
    Failed(miette::Report),
    /// Unblocks a pending fetch after a stop request.
    Wake,
}

/// Creates an upstream and the publisher that feeds it.
#[must_use]
pub fn channel_upstream<R: Send + 'static>() -> (ChannelUpstream<R>, RecordPublisher<R>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stopped = Arc::new(AtomicBool::new(false));
    let upstream = ChannelUpstream {
        rx,
        wake_tx: tx.downgrade(),
        stopped: Arc::clone(&stopped),
    };
    let publisher = RecordPublisher { tx, stopped };
    (upstream, publisher)
}

#[derive(Debug)]
pub struct ChannelUpstream<R> {
    rx: UnboundedReceiver<UpstreamMsg<R>>,
    wake_tx: WeakUnboundedSender<UpstreamMsg<R>>,
    stopped: Arc<AtomicBool>,
}

impl<R: Send + 'static> UpstreamSource for ChannelUpstream<R> {
    type Record = R;
    type Fetcher = ChannelFetcher<R>;
    type Stopper = ChannelStopper<R>;

    fn start(self) -> miette::Result<(Self::Fetcher, Self::Stopper)> {
        let fetcher = ChannelFetcher {
            rx: self.rx,
            stopped: Arc::clone(&self.stopped),
        };
        let stopper = ChannelStopper {
            wake_tx: self.wake_tx,
            stopped: self.stopped,
        };
        Ok((fetcher, stopper))
    }
}

/// Publishing side. Cloneable; the stream ends cleanly once every publisher is gone.
#[derive(Debug)]
pub struct RecordPublisher<R> {
    tx: UnboundedSender<UpstreamMsg<R>>,
    stopped: Arc<AtomicBool>,
}

impl<R> Clone for RecordPublisher<R> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            stopped: Arc::clone(&self.stopped),
        }
    }
}

impl<R> RecordPublisher<R> {
    /// Queue a record for the producer thread. Never blocks.
    ///
    /// # Errors
    ///
    /// Hands `record` back if a stop was requested or the fetcher is gone.
    pub fn publish(&self, record: R) -> Result<(), R> {
        if self.is_stopped() {
            return Err(record);
        }
        match self.tx.send(UpstreamMsg::Record(record)) {
            Err(SendError(UpstreamMsg::Record(record))) => Err(record),
            _ => Ok(()),
        }
    }

    /// Make the fetch after all queued records report [`Fetched::Failed`].
    pub fn fail(&self, report: miette::Report) {
        drop(self.tx.send(UpstreamMsg::Failed(report)));
    }

    /// End the stream from the publishing side, after all queued records. Only takes
    /// effect once every clone of this publisher is gone.
    pub fn finish(self) { drop(self); }

    #[must_use]
    pub fn is_stopped(&self) -> bool { self.stopped.load(Ordering::SeqCst) }
}

#[derive(Debug)]
pub struct ChannelFetcher<R> {
    rx: UnboundedReceiver<UpstreamMsg<R>>,
    stopped: Arc<AtomicBool>,
}

impl<R> ChannelFetcher<R> {
    /// Refuse new messages and free the records that will never be fetched.
    fn close_and_drain(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

impl<R: Send + 'static> RecordFetcher for ChannelFetcher<R> {
    type Record = R;

    fn fetch_next(&mut self) -> Fetched<Self::Record> {
        if self.stopped.load(Ordering::SeqCst) {
            self.close_and_drain();
            return Fetched::EndMarker;
        }
        match self.rx.blocking_recv() {
            Some(UpstreamMsg::Record(record)) => Fetched::Record(record),
            Some(UpstreamMsg::Failed(report)) => Fetched::Failed(report),
            Some(UpstreamMsg::Wake) | None => {
                self.close_and_drain();
                Fetched::EndMarker
            }
        }
    }
}

/// Holds only a weak sender, so it never keeps the stream open by itself.
#[derive(Debug)]
pub struct ChannelStopper<R> {
    wake_tx: WeakUnboundedSender<UpstreamMsg<R>>,
    stopped: Arc<AtomicBool>,
}

impl<R: Send + 'static> UpstreamStopper for ChannelStopper<R> {
    fn stop_upstream(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(tx) = self.wake_tx.upgrade() {
            drop(tx.send(UpstreamMsg::Wake));
        }
    }
}
