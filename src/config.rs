// SPDX-License-Identifier: MIT OR Apache-2.0

//! Initialization settings for a [`ContextLogger`](crate::ContextLogger).

use crate::level::Severity;
use crate::ring_buffer::DEFAULT_CAPACITY;

/// Everything [`ContextLogger::init_with_config`](crate::ContextLogger::init_with_config) applies.
///
/// ```
/// use contextlog::{LogConfig, Severity};
///
/// let config = LogConfig::default()
///     .with_level(Severity::Error)
///     .with_buffer_capacity(256)
///     .with_release(true);
/// assert_eq!(config.level, Severity::Error);
/// assert!(config.context_caching);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Active level after initialization.
    pub level: Severity,
    /// Number of messages retained for an error dump.
    pub buffer_capacity: usize,
    /// Whether sub-threshold messages are retained and replayed on errors.
    pub context_caching: bool,
    /// Most verbose level the host wants cached.
    pub client_max_level: Severity,
    /// Suppresses the fallback console.
    pub release: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            buffer_capacity: DEFAULT_CAPACITY,
            context_caching: true,
            client_max_level: Severity::Trace,
            release: false,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_context_caching(mut self, enabled: bool) -> Self {
        self.context_caching = enabled;
        self
    }

    pub fn with_client_max_level(mut self, level: Severity) -> Self {
        self.client_max_level = level;
        self
    }

    pub fn with_release(mut self, release: bool) -> Self {
        self.release = release;
        self
    }
}
