// SPDX-License-Identifier: MIT OR Apache-2.0

//! Formatting macros.
//!
//! Each macro takes a logger, a tag and `format!`-style arguments.  The arguments are
//! only formatted if the logger would emit or cache a message at that level, so
//! expensive `Debug` output costs nothing while the facility isn't interested.
//!
//! ```rust
//! use contextlog::{ContextLogger, InMemoryAppender, Severity};
//! use std::sync::Arc;
//!
//! let appender = Arc::new(InMemoryAppender::new());
//! let logger = ContextLogger::new();
//! logger.init_log_with_level(appender.clone(), Severity::Info);
//!
//! let port = 8080;
//! contextlog::info!(logger, "Server", "listening on {port}");
//! contextlog::debug!(logger, "Server", "not emitted at Info: {:?}", vec![1, 2, 3]);
//!
//! assert!(appender.drain_logs().contains("[Server] listening on 8080"));
//! ```

/// Whether `logger` would emit or cache a message at `level`.
#[macro_export]
macro_rules! log_enabled {
    ($logger:expr, $level:expr) => {
        $logger.is_interested($level)
    };
}

/// Logs a formatted, tagged message at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $tag:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_interested(level) {
            logger.log(level, $tag, &::std::format!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $tag, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $tag, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $tag, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $tag, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $tag, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Verbose, $tag, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ContextLogger, InMemoryAppender, Severity};
    use std::cell::Cell;
    use std::fmt;
    use std::sync::Arc;

    struct Counted<'a>(&'a Cell<u32>);

    impl fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            f.write_str("counted")
        }
    }

    fn logger(level: Severity) -> (ContextLogger, Arc<InMemoryAppender>) {
        let appender = Arc::new(InMemoryAppender::new());
        let logger = ContextLogger::new();
        logger.set_release(true);
        logger.init_log_with_level(appender.clone(), level);
        appender.drain_logs();
        (logger, appender)
    }

    #[test]
    fn skips_formatting_when_uninterested() {
        let (logger, appender) = logger(Severity::Info);
        let calls = Cell::new(0);
        crate::trace!(logger, "T", "{}", Counted(&calls));
        assert_eq!(calls.get(), 0);
        crate::info!(logger, "T", "{}", Counted(&calls));
        assert_eq!(calls.get(), 1);
        assert_eq!(appender.messages(), ["[T] counted"]);
    }

    #[test]
    fn every_level_macro_routes() {
        let (logger, appender) = logger(Severity::Warn);
        crate::error!(logger, "E", "e{}", 1);
        crate::warn!(logger, "W", "w{}", 2);
        crate::info!(logger, "I", "i{}", 3);
        crate::debug!(logger, "D", "d{}", 4);
        crate::trace!(logger, "T", "t{}", 5);
        crate::verbose!(logger, "V", "v{}", 6);
        let tags: Vec<String> = appender.entries().into_iter().map(|e| e.level_tag).collect();
        assert_eq!(tags, ["ERROR", "WARN", "INFO", "DEBUG", "TRACE", "VERBOSE"]);
        assert!(crate::log_enabled!(logger, Severity::Verbose));
    }
}
