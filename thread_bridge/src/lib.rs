// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_thread_bridge
//!
//! Delivers records produced by a **blocking** upstream source, running on a dedicated
//! producer thread, to a handler that runs inside a **single-threaded** [`tokio`]
//! consumer context ([`LocalSet`]).
//!
//! - Every record is delivered exactly once, in the order it was fetched.
//! - The producer never gets more than one record ahead of the handler.
//! - A one-shot [`CompletionHandle`] resolves exactly once, after the producer thread
//!   has been joined.
//!
//! ```no_run
//! use r3bl_thread_bridge::{channel_upstream, create_bridge};
//!
//! # async fn demo() -> miette::Result<()> {
//! let local_set = tokio::task::LocalSet::new();
//! local_set
//!     .run_until(async {
//!         let (upstream, publisher) = channel_upstream::<String>();
//!         let bridge = create_bridge(upstream, |line: String| println!("{line}"))?;
//!
//!         std::thread::spawn(move || {
//!             drop(publisher.publish("hello".to_string()));
//!             publisher.finish();
//!         });
//!
//!         let summary = bridge.await?;
//!         assert_eq!(summary.records_delivered, 1);
//!         Ok::<_, miette::Report>(())
//!     })
//!     .await
//! # }
//! ```
//!
//! See the [`bridge`] module for the lifecycle in detail.
//!
//! [`LocalSet`]: tokio::task::LocalSet

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod bridge;
pub mod common;
pub mod log;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use bridge::*;
pub use common::*;
pub use log::*;
