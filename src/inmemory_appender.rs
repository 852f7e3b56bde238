// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Appender
//!
//! An [`Appender`] that keeps every line it receives in memory.  Useful for:
//!
//! - Unit testing code that logs through a [`ContextLogger`](crate::ContextLogger)
//! - Capturing logs where no file or console is available
//! - Programmatically examining what reached the sink, error-context dumps included
//!
//! ## Architecture
//!
//! Lines are stored as `(level_tag, message)` pairs behind a `Mutex`.  The appender
//! tracks whether it is open and rejects writes with [`AppenderError::Closed`] when it
//! is not, which makes it handy for exercising the facility's failure paths too.

use crate::appender::{Appender, LogContent};
use crate::error::AppenderError;
use crate::level::Severity;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One line as the appender received it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub level_tag: String,
    pub message: String,
}

/// An appender that stores lines in a `Vec`.
///
/// # Example
///
/// ```rust
/// use contextlog::{ContextLogger, InMemoryAppender, Severity};
/// use std::sync::Arc;
///
/// let appender = Arc::new(InMemoryAppender::new());
/// let logger = ContextLogger::new();
/// logger.init_log_with_level(appender.clone(), Severity::Info);
///
/// logger.info_tagged("Startup", "listening on 8080");
///
/// let logs = appender.drain_logs();
/// assert!(logs.contains("[Startup] listening on 8080"));
/// ```
#[derive(Debug)]
pub struct InMemoryAppender {
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    entries: Vec<Entry>,
    open: bool,
    minimum_level: Option<Severity>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: derived, required by Appender
// - Default: empty and closed, same as new()
// - Clone: NOT implemented, appenders are shared through Arc
// - PartialEq/Eq/Hash: NOT implemented, equality of a live sink is unclear
// - Send/Sync: automatic through Mutex

impl Default for InMemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAppender {
    /// Creates a closed appender with no entries.  The facility opens it on init.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                entries: Vec::new(),
                open: false,
                minimum_level: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the stored entries, oldest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.state().entries.clone()
    }

    /// Snapshot of the stored messages without their tags.
    pub fn messages(&self) -> Vec<String> {
        self.state()
            .entries
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Drains all entries into a single string, one `[TAG] message` per line.
    ///
    /// The internal buffer is cleared, so a second call returns an empty string
    /// unless something was written in between.
    pub fn drain_logs(&self) -> String {
        let mut state = self.state();
        let result = render(&state.entries);
        state.entries.clear();
        result
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// The level most recently pushed by the facility, if any.
    pub fn minimum_level(&self) -> Option<Severity> {
        self.state().minimum_level
    }
}

fn render(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| format!("[{}] {}", entry.level_tag, entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Appender for InMemoryAppender {
    fn open_for_writing(&self) -> Result<(), AppenderError> {
        self.state().open = true;
        Ok(())
    }

    fn close(&self) -> Result<(), AppenderError> {
        self.state().open = false;
        Ok(())
    }

    fn delete(&self) -> Result<(), AppenderError> {
        self.state().entries.clear();
        Ok(())
    }

    fn set_minimum_level(&self, level: Severity) {
        self.state().minimum_level = Some(level);
    }

    fn write(&self, level_tag: &str, message: &str) -> Result<(), AppenderError> {
        let mut state = self.state();
        if !state.open {
            return Err(AppenderError::Closed);
        }
        state.entries.push(Entry {
            level_tag: level_tag.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn log_content(&self) -> Result<LogContent, AppenderError> {
        Ok(LogContent::Text(render(&self.state().entries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_writes_until_opened() {
        let appender = InMemoryAppender::new();
        assert!(matches!(
            appender.write("INFO", "too early"),
            Err(AppenderError::Closed)
        ));
        appender.open_for_writing().unwrap();
        appender.write("INFO", "hello").unwrap();
        assert_eq!(appender.messages(), ["hello"]);
    }

    #[test]
    fn drain_clears() {
        let appender = InMemoryAppender::new();
        appender.open_for_writing().unwrap();
        appender.write("ERROR", "first").unwrap();
        appender.write("WARN", "second").unwrap();
        assert_eq!(appender.drain_logs(), "[ERROR] first\n[WARN] second");
        assert_eq!(appender.drain_logs(), "");
    }

    #[test]
    fn content_reads_back_without_clearing() {
        let appender = InMemoryAppender::new();
        appender.open_for_writing().unwrap();
        appender.write("INFO", "kept").unwrap();
        let content = appender.log_content().unwrap();
        assert_eq!(content, LogContent::Text("[INFO] kept".to_string()));
        assert_eq!(content.content_type(), "text/plain");
        assert_eq!(appender.entries().len(), 1);
    }

    #[test]
    fn delete_erases_but_stays_open() {
        let appender = InMemoryAppender::new();
        appender.open_for_writing().unwrap();
        appender.write("INFO", "gone").unwrap();
        appender.delete().unwrap();
        assert!(appender.entries().is_empty());
        assert!(appender.is_open());
    }
}
