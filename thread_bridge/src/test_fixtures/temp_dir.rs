// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU32, Ordering},
};

use miette::IntoDiagnostic;

static NEXT_TEMP_DIR_ID: AtomicU32 = AtomicU32::new(0);

/// A directory under [`std::env::temp_dir()`] that is deleted when dropped.
#[derive(Debug)]
pub struct TempDir {
    inner: PathBuf,
}

impl Deref for TempDir {
    type Target = Path;

    fn deref(&self) -> &Self::Target { &self.inner }
}

impl Drop for TempDir {
    fn drop(&mut self) { drop(std::fs::remove_dir_all(&self.inner)); }
}

/// # Errors
///
/// Returns an error if the directory can't be created.
pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let id = NEXT_TEMP_DIR_ID.fetch_add(1, Ordering::Relaxed);
    let name = format!("r3bl_thread_bridge_{}_{id}", std::process::id());
    let new_temp_dir = std::env::temp_dir().join(name);
    std::fs::create_dir_all(&new_temp_dir).into_diagnostic()?;
    Ok(TempDir {
        inner: new_temp_dir,
    })
}
