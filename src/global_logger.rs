// SPDX-License-Identifier: MIT OR Apache-2.0

//! An optional process-wide [`ContextLogger`].
//!
//! The facility is an ordinary value: construct it at startup and pass it to whoever
//! logs.  Some hosts still need to reach it from code that can't take a parameter
//! (signal handlers, callbacks registered with C libraries, panic hooks).  For those,
//! one instance can be installed here.
//!
//! # Thread Safety
//!
//! The slot sits behind a spinlock that is held only long enough to swap or clone the
//! `Arc`, which keeps it usable from the wasm main thread.  Logging itself happens
//! after the lock is released, so a slow appender never blocks another thread's lookup.
//!
//! # Examples
//!
//! ```
//! use contextlog::global_logger::{global_logger, set_global_logger, take_global_logger};
//! use contextlog::{ContextLogger, InMemoryAppender};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(ContextLogger::new());
//! logger.init_log(Arc::new(InMemoryAppender::new()));
//! set_global_logger(logger.clone());
//!
//! if let Some(logger) = global_logger() {
//!     logger.info_tagged("Hook", "reached from a callback");
//! }
//!
//! let previous = take_global_logger();
//! assert!(previous.is_some());
//! assert!(global_logger().is_none());
//! ```

use crate::facility::ContextLogger;
use crate::spinlock::Spinlock;
use std::sync::Arc;

static GLOBAL_LOGGER: Spinlock<Option<Arc<ContextLogger>>> = Spinlock::new(None);

/// The installed logger, if any.
pub fn global_logger() -> Option<Arc<ContextLogger>> {
    GLOBAL_LOGGER.with(|slot| slot.clone())
}

/// Installs `logger`, returning the one it replaces.
pub fn set_global_logger(logger: Arc<ContextLogger>) -> Option<Arc<ContextLogger>> {
    GLOBAL_LOGGER.with(|slot| slot.replace(logger))
}

/// Empties the slot, returning what was installed.
pub fn take_global_logger() -> Option<Arc<ContextLogger>> {
    GLOBAL_LOGGER.with(|slot| slot.take())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn set_returns_previous() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        take_global_logger();

        let first = Arc::new(ContextLogger::new());
        let second = Arc::new(ContextLogger::new());
        assert!(set_global_logger(first.clone()).is_none());
        let replaced = set_global_logger(second.clone()).unwrap();
        assert!(Arc::ptr_eq(&replaced, &first));
        assert!(Arc::ptr_eq(&global_logger().unwrap(), &second));

        take_global_logger();
    }

    #[test]
    fn thread_safety() {
        use std::thread;

        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        take_global_logger();

        let logger = Arc::new(ContextLogger::new());
        let logger_clone = logger.clone();
        let handle = thread::spawn(move || {
            set_global_logger(logger_clone);
        });
        let _ = global_logger();
        handle.join().expect("Thread should complete successfully");

        assert!(Arc::ptr_eq(&global_logger().unwrap(), &logger));
        take_global_logger();
    }
}
