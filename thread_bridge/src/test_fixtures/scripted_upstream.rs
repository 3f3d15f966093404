// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use super::{RecordLedger, TrackedRecord};
use crate::{Fetched, RecordFetcher, UpstreamSource, UpstreamStopper};

/// One scripted answer of [`ScriptedFetcher::fetch_next()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Yield(u32),
    Fail(&'static str),
    Panic,
    End,
}

/// What the fetcher does once the script runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTail {
    End,
    /// Keep yielding increasing ids until a stop is requested.
    YieldUntilStopped,
}

/// What happened, in order, across the producer and consumer threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    FetchEnter,
    FetchReturn(Option<u32>),
    HandlerEnter(u32),
    HandlerExit(u32),
    StopRequested,
    FetcherDropped,
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<JournalEntry>>>);

impl Journal {
    /// # Panics
    ///
    /// If the mutex is poisoned.
    pub fn push(&self, entry: JournalEntry) { self.0.lock().unwrap().push(entry); }

    /// # Panics
    ///
    /// If the mutex is poisoned.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> { self.0.lock().unwrap().clone() }
}

/// Stub upstream that plays back a fixed script of [`ScriptStep`]s.
#[derive(Debug)]
pub struct ScriptedUpstream {
    steps: VecDeque<ScriptStep>,
    tail: ScriptTail,
    fail_start: bool,
    ledger: Arc<RecordLedger>,
    journal: Journal,
    producer_thread_name: Arc<Mutex<Option<String>>>,
}

impl ScriptedUpstream {
    #[must_use]
    pub fn new(steps: Vec<ScriptStep>, ledger: &Arc<RecordLedger>, journal: &Journal) -> Self {
        Self {
            steps: steps.into(),
            tail: ScriptTail::End,
            fail_start: false,
            ledger: Arc::clone(ledger),
            journal: journal.clone(),
            producer_thread_name: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_tail(mut self, tail: ScriptTail) -> Self {
        self.tail = tail;
        self
    }

    #[must_use]
    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Name of the thread that made the first fetch, once there was one.
    #[must_use]
    pub fn producer_thread_name_probe(&self) -> Arc<Mutex<Option<String>>> {
        Arc::clone(&self.producer_thread_name)
    }

    /// Same as [`UpstreamSource::start()`] without the [`miette::Result`] wrapping.
    #[must_use]
    pub fn start_fetcher(self) -> (ScriptedFetcher, ScriptedStopper) {
        let stopped = Arc::new(AtomicBool::new(false));
        let fetcher = ScriptedFetcher {
            steps: self.steps,
            tail: self.tail,
            next_id: 0,
            ledger: self.ledger,
            journal: self.journal.clone(),
            stopped: Arc::clone(&stopped),
            producer_thread_name: self.producer_thread_name,
        };
        let stopper = ScriptedStopper {
            stopped,
            journal: self.journal,
        };
        (fetcher, stopper)
    }
}

impl UpstreamSource for ScriptedUpstream {
    type Record = TrackedRecord;
    type Fetcher = ScriptedFetcher;
    type Stopper = ScriptedStopper;

    fn start(self) -> miette::Result<(Self::Fetcher, Self::Stopper)> {
        if self.fail_start {
            return Err(miette::miette!("scripted upstream refused to start"));
        }
        Ok(self.start_fetcher())
    }
}

#[derive(Debug)]
pub struct ScriptedFetcher {
    steps: VecDeque<ScriptStep>,
    tail: ScriptTail,
    next_id: u32,
    ledger: Arc<RecordLedger>,
    journal: Journal,
    stopped: Arc<AtomicBool>,
    producer_thread_name: Arc<Mutex<Option<String>>>,
}

impl ScriptedFetcher {
    fn next_step(&mut self) -> ScriptStep {
        if self.stopped.load(Ordering::SeqCst) {
            return ScriptStep::End;
        }
        match self.steps.pop_front() {
            Some(step) => step,
            None => match self.tail {
                ScriptTail::End => ScriptStep::End,
                ScriptTail::YieldUntilStopped => ScriptStep::Yield(self.next_id),
            },
        }
    }
}

impl RecordFetcher for ScriptedFetcher {
    type Record = TrackedRecord;

    fn fetch_next(&mut self) -> Fetched<Self::Record> {
        self.journal.push(JournalEntry::FetchEnter);
        if let Ok(mut name) = self.producer_thread_name.lock() {
            if name.is_none() {
                *name = std::thread::current().name().map(ToString::to_string);
            }
        }

        let (fetched, returned_id) = match self.next_step() {
            ScriptStep::Yield(id) => {
                self.next_id = id + 1;
                (Fetched::Record(TrackedRecord::new(id, &self.ledger)), Some(id))
            }
            ScriptStep::Fail(msg) => (Fetched::Failed(miette::miette!("{msg}")), None),
            ScriptStep::Panic => panic!("scripted upstream panic"),
            ScriptStep::End => (Fetched::EndMarker, None),
        };

        self.journal.push(JournalEntry::FetchReturn(returned_id));
        fetched
    }
}

impl Drop for ScriptedFetcher {
    fn drop(&mut self) { self.journal.push(JournalEntry::FetcherDropped); }
}

#[derive(Debug)]
pub struct ScriptedStopper {
    stopped: Arc<AtomicBool>,
    journal: Journal,
}

impl UpstreamStopper for ScriptedStopper {
    fn stop_upstream(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            self.journal.push(JournalEntry::StopRequested);
        }
    }
}
