// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end tests of the bridge, with a real producer thread and a real [`LocalSet`].
//!
//! - [`bridge_lifecycle_tests`]: ordering, backpressure, stopping, completion.
//! - [`bridge_fatal_tests`]: lifecycle violations that abort the process. These run in
//!   a child process, see [`crate::test_fixtures::isolated_process`].
//!
//! [`LocalSet`]: tokio::task::LocalSet
