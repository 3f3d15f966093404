// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use miette::IntoDiagnostic;
use tracing::dispatcher::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::try_create_layers;

/// Default log file used when only a level is supplied.
pub const DEFAULT_LOG_FILE_NAME: &str = "thread_bridge_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// Most of the time you don't build this by hand. Anything that implements
/// [`Into<TracingConfig>`] can be passed to [`try_initialize_logging_global`], and
/// configs can be merged with `+`:
///
/// ```no_run
/// use r3bl_thread_bridge::{DisplayPreference, TracingConfig, WriterConfig};
///
/// let level: TracingConfig = tracing::Level::DEBUG.into();
/// let display: TracingConfig = DisplayPreference::Stderr.into();
/// let both = level + display;
/// assert_eq!(
///     both.writer_config,
///     WriterConfig::DisplayAndFile(DisplayPreference::Stderr, "thread_bridge_log.txt".into())
/// );
/// ```
///
/// [`try_initialize_logging_global`]: super::try_initialize_logging_global
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    /// Log file path.
    File(String),
    /// Log file path.
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file_and_display(
        filename: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    /// Installs a process wide subscriber. Can only succeed once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created, or if a global subscriber has
    /// already been installed.
    pub fn install_global(self) -> miette::Result<()> {
        let layers = try_create_layers(&self)?;
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic()
    }

    /// Installs a subscriber for the current thread only. It stays active until the
    /// returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn install_thread_local(self) -> miette::Result<DefaultGuard> {
        let layers = try_create_layers(&self)?;
        let subscriber = tracing_subscriber::registry().with(layers);
        Ok(tracing::subscriber::set_default(subscriber))
    }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// Merge two [`TracingConfig`] instances together. The more verbose level wins.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two [`WriterConfig`] instances together. The `rhs` clobbers `self` where both
/// have a value, since it has higher specificity:
/// - `{a: "foo"} + {a: "bar"} = {a: "bar"}`.
/// - `{a: None } + {a: "bar"} = {a: "bar"}`.
/// - `{a: "foo"} + {a: None } = {a: "foo"}`.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            // No collision merge.
            (None, rhs) => rhs,
            (lhs, None) => lhs,
            (Display(dp), File(f)) | (File(f), Display(dp)) => DisplayAndFile(dp, f),

            // Collision. DisplayPreference and String can't be merged, rhs wins.
            (Display(_) | File(_), DisplayAndFile(dp, f)) => DisplayAndFile(dp, f),
            (Display(_), Display(dp)) => Display(dp),
            (File(_), File(f)) => File(f),
            (DisplayAndFile(_, f), Display(dp)) => DisplayAndFile(dp, f),
            (DisplayAndFile(dp, _), File(f)) => DisplayAndFile(dp, f),
            (DisplayAndFile(..), DisplayAndFile(dp, f)) => DisplayAndFile(dp, f),
        }
    }
}
