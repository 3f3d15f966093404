// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Some tests must run in a process of their own: the dispatch failure path calls
//! [`std::process::abort()`], which would take the whole test harness down with it. The
//! coordinator test re-runs the current test binary, filtered to itself, with
//! [`ISOLATED_TEST_RUNNER`] set, and then inspects the child's exit status and stderr.

/// Env var that tells a test it is running inside the isolated child process.
pub const ISOLATED_TEST_RUNNER: &str = "ISOLATED_TEST_RUNNER";

#[must_use]
pub fn is_isolated_test_runner() -> bool { std::env::var(ISOLATED_TEST_RUNNER).is_ok() }

/// Builds a command that re-runs the current test binary with only `test_name`
/// selected, in the isolated mode.
///
/// # Panics
///
/// If the path of the current test binary can't be determined.
#[must_use]
pub fn new_isolated_test_command(test_name: &str) -> std::process::Command {
    let current_exe =
        std::env::current_exe().expect("Failed to get current test executable");
    let mut cmd = std::process::Command::new(current_exe);
    cmd.env(ISOLATED_TEST_RUNNER, "1")
        .env("RUST_BACKTRACE", "1")
        .args(["--exact", "--test-threads", "1", "--nocapture", test_name]);
    cmd
}
