// SPDX-License-Identifier: MIT OR Apache-2.0

//! The line written to the fallback console.
//!
//! A [`LogRecord`] accumulates message parts and is rendered once, when it is handed to
//! the console.  Parts are kept separate so the timestamp and the tag can be added
//! without concatenating into an intermediate string.
//!
//! ```rust
//! use contextlog::{LogRecord, Severity};
//!
//! let mut record = LogRecord::new(Severity::Info, "INFO");
//! record.log("[Net] ");
//! record.log("connected to db-1");
//! assert_eq!(record.to_string(), "[INFO] [Net] connected to db-1");
//! ```

use crate::level::Severity;
use std::fmt::{Debug, Display};
use std::sync::OnceLock;

static INITIAL_TIMESTAMP: OnceLock<crate::sys::Instant> = OnceLock::new();

/// The instant all console timestamps are measured from.  Fixed by the first call.
pub(crate) fn initial_timestamp() -> crate::sys::Instant {
    *INITIAL_TIMESTAMP.get_or_init(crate::sys::Instant::now)
}

/**
A console line.

1.  Create a new [LogRecord] with its level and display tag.
2.  Optionally stamp it with [LogRecord::log_timestamp].
3.  Append the message parts.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    prefix: Option<String>,
    parts: Vec<String>,
    level: Severity,
    level_tag: String,
}

impl LogRecord {
    pub fn new(level: Severity, level_tag: &str) -> Self {
        Self {
            prefix: None,
            parts: Vec::new(),
            level,
            level_tag: level_tag.to_string(),
        }
    }

    /**
    Append the message to the record.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Stamp the record with the time elapsed since the first record of the process.
    */
    pub fn log_timestamp(&mut self) {
        let duration = crate::sys::Instant::now().duration_since(initial_timestamp());
        self.prefix = Some(format!("[{:?}] ", duration));
    }

    pub fn level(&self) -> Severity {
        self.level
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
        }
        write!(f, "[{}] ", self.level_tag)?;
        for part in &self.parts {
            f.write_str(part)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for LogRecord:

- Clone/Eq/Hash: derived, it's plain data
- Default: NOT implemented, a record always needs a level tag
- Display: `[timestamp] [TAG] message`, the console line
- Ord: no meaningful ordering
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_comes_first() {
        let mut record = LogRecord::new(Severity::Error, "ERROR");
        record.log("boom");
        record.log_timestamp();
        let line = record.to_string();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] [ERROR] boom"), "{line}");
    }

    #[test]
    fn untimed_record_starts_with_tag() {
        let mut record = LogRecord::new(Severity::Warn, "[Error Context]");
        record.log("first ");
        record.log("second");
        assert_eq!(record.level(), Severity::Warn);
        assert_eq!(record.to_string(), "[[Error Context]] first second");
    }
}
