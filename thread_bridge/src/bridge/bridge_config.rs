// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const DEFAULT_THREAD_NAME_PREFIX: &str = "thread-bridge";

/// Knobs for [`create_bridge_with_config()`]. There is deliberately no queue depth:
/// backpressure comes from the one-record handshake, not from a buffer size.
///
/// ```
/// use r3bl_thread_bridge::BridgeConfig;
///
/// let config = BridgeConfig::default()
///     .with_thread_name_prefix("flow-producer")
///     .with_stack_size(256 * 1024);
/// assert_eq!(config.thread_name(3), "flow-producer-gen-3");
/// ```
///
/// [`create_bridge_with_config()`]: super::create_bridge_with_config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// The producer thread is named `{thread_name_prefix}-gen-{generation}`.
    pub thread_name_prefix: String,
    /// Stack size of the producer thread. [`None`] uses the platform default.
    pub stack_size: Option<usize>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl BridgeConfig {
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    #[must_use]
    pub fn thread_name(&self, generation: u32) -> String {
        format!("{}-gen-{generation}", self.thread_name_prefix)
    }

    pub(super) fn thread_builder(&self, generation: u32) -> std::thread::Builder {
        let builder = std::thread::Builder::new().name(self.thread_name(generation));
        match self.stack_size {
            Some(stack_size) => builder.stack_size(stack_size),
            None => builder,
        }
    }
}
