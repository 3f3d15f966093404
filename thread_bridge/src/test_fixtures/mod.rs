// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures shared by the tests in this crate.

// Attach sources.
pub mod isolated_process;
pub mod scripted_upstream;
pub mod temp_dir;
pub mod tracked_record;

// Re-export.
pub use isolated_process::*;
pub use scripted_upstream::*;
pub use temp_dir::*;
pub use tracked_record::*;
