// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`tracing`] setup for applications and tests that embed the bridge. The bridge itself
//! only emits events (producer lifecycle at `debug`, fatal dispatch failures at
//! `error`); nothing is printed unless a subscriber is installed with one of the
//! functions below.

// Attach sources.
pub mod public_api;
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use public_api::*;
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
