// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logging facility.
//!
//! [`ContextLogger`] receives every logging call, decides whether the message is
//! emitted, retains recent messages in a [`ContextRingBuffer`] and, when an error is
//! logged, replays that history ahead of the error line.
//!
//! # Flow
//!
//! For each call the facility, under one lock:
//!
//! 1. If context caching is on, either caches the message (non-errors, while the active
//!    level is below the client's maximum) or, for an error, dumps the retained history:
//!    a separator, every retained message tagged `[Error Context]`, a second separator.
//!    The buffer is then reset.
//! 2. Emits the message itself if the active level admits it, to the [`Appender`] and,
//!    unless the facility is in release mode, to the fallback [`Console`].
//!
//! Holding the lock across both steps keeps a dump contiguous: no other thread's message
//! lands between the separators.
//!
//! # Failure
//!
//! Logging never fails and never panics on behalf of a sink.  Appender and console
//! errors are reported best-effort on stderr and dropped.  Changing the level while it
//! is locked is a silent no-op.
//!
//! An appender may call back into the facility that is writing to it, on the same
//! thread, while the lock is held.  Such nested calls never wait for the lock: logging
//! and setting calls are dropped with a note on stderr, and queries answer as an
//! uninitialized facility would.
//!
//! # Lifecycle
//!
//! A facility starts uninitialized: logging calls are no-ops until one of the `init_*`
//! operations binds an appender.  [`ContextLogger::shutdown`] consumes the facility and
//! asks the appender to close.
//!
//! ```
//! use contextlog::{ContextLogger, InMemoryAppender, Severity};
//! use std::sync::Arc;
//!
//! let appender = Arc::new(InMemoryAppender::new());
//! let logger = ContextLogger::new();
//! logger.init_log_with_capacity(appender.clone(), Severity::Info, 16);
//! logger.set_release(true);
//!
//! logger.debug_tagged("Sync", "fetching page 1");
//! logger.debug_tagged("Sync", "fetching page 2");
//! logger.error_tagged("Sync", "server closed the connection");
//!
//! let messages = appender.messages();
//! assert_eq!(messages[messages.len() - 3], "[Sync] fetching page 2");
//! assert_eq!(messages[messages.len() - 1], "[Sync] server closed the connection");
//! ```

use crate::appender::{Appender, LogContent};
use crate::config::LogConfig;
use crate::console::{Console, report_internal};
use crate::error::Error;
use crate::level::Severity;
use crate::log_record::LogRecord;
use crate::policy::LevelPolicy;
use crate::ring_buffer::{ContextRingBuffer, DEFAULT_CAPACITY};
use crate::sys::Instant;
use crate::trace::{SourceChainFormatter, StackTraceFormatter};
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Level tag of the lines replayed ahead of an error.
pub const ERROR_CONTEXT_TAG: &str = "[Error Context]";
/// Line framing an error-context dump.
pub const CONTEXT_SEPARATOR: &str = "==================================================";

const INIT_TAG: &str = "INITLog";
const INIT_BANNER: &str = "---------";
const MEMORY_TAG: &str = "PROFILING-MEMORY";
const TIME_TAG: &str = "PROFILING-TIME";

thread_local! {
    // facilities whose state lock this thread holds
    static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/**
A leveled logger that replays recent fine-grained messages when an error is logged.

Construct one at startup, initialize it with an appender and share it by reference or
`Arc`.  Every method takes `&self` and can be called from any thread.
*/
#[derive(Debug)]
pub struct ContextLogger {
    state: Mutex<State>,
    console: Console,
    formatter: Box<dyn StackTraceFormatter>,
}

#[derive(Debug)]
struct State {
    policy: LevelPolicy,
    appender: Option<Arc<dyn Appender>>,
    buffer: Option<ContextRingBuffer>,
    capacity: usize,
    context_caching: bool,
    release: bool,
    profiling_epoch: Option<Instant>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            policy: LevelPolicy::default(),
            appender: None,
            buffer: None,
            capacity: DEFAULT_CAPACITY,
            context_caching: false,
            release: false,
            profiling_epoch: None,
        }
    }
}

/// The state lock, marked as held by the current thread until dropped.
struct Held<'a> {
    state: MutexGuard<'a, State>,
    key: usize,
}

impl Deref for Held<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        &self.state
    }
}

impl DerefMut for Held<'_> {
    fn deref_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl Drop for Held<'_> {
    fn drop(&mut self) {
        HELD.with(|held| held.borrow_mut().retain(|key| *key != self.key));
    }
}

impl Default for ContextLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextLogger {
    /// Creates an uninitialized facility using [`SourceChainFormatter`] for causes.
    pub fn new() -> Self {
        Self::with_formatter(SourceChainFormatter)
    }

    /// Creates an uninitialized facility that renders causes with `formatter`.
    pub fn with_formatter(formatter: impl StackTraceFormatter + 'static) -> Self {
        Self {
            state: Mutex::new(State::default()),
            console: Console::new(),
            formatter: Box::new(formatter),
        }
    }

    /// Takes the state lock, or `None` if this thread already holds it.
    fn lock(&self) -> Option<Held<'_>> {
        let key = &self.state as *const Mutex<State> as usize;
        if HELD.with(|held| held.borrow().contains(&key)) {
            return None;
        }
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        HELD.with(|held| held.borrow_mut().push(key));
        Some(Held { state, key })
    }

    fn read<R>(&self, query: impl FnOnce(&State) -> R) -> R {
        match self.lock() {
            Some(state) => query(&state),
            None => query(&State::default()),
        }
    }

    fn update(&self, operation: &str, change: impl FnOnce(&mut State)) {
        match self.lock() {
            Some(mut state) => change(&mut state),
            None => report_internal("nested call from the appender dropped", &operation),
        }
    }

    // ------------------------------------------------------------------
    // Initialization

    /// Binds `appender` at [`Severity::Info`] with context caching off.
    pub fn init_log(&self, appender: Arc<dyn Appender>) {
        self.init_log_with_level(appender, Severity::Info);
    }

    /// Binds `appender` at `level` with context caching off.
    pub fn init_log_with_level(&self, appender: Arc<dyn Appender>, level: Severity) {
        self.update("init_log", |state| {
            let capacity = state.capacity;
            self.initialize(state, appender, level, capacity);
        });
    }

    /// Binds `appender` at `level` and turns context caching on with room for `capacity` messages.
    pub fn init_log_with_capacity(
        &self,
        appender: Arc<dyn Appender>,
        level: Severity,
        capacity: usize,
    ) {
        self.update("init_log", |state| {
            self.initialize(state, appender, level, capacity);
            state.context_caching = true;
        });
    }

    /// Binds `appender` and applies every setting in `config`.
    pub fn init_with_config(&self, appender: Arc<dyn Appender>, config: &LogConfig) {
        self.update("init_log", |state| {
            state.release = config.release;
            state.policy.set_client_max_level(config.client_max_level);
            self.initialize(state, appender, config.level, config.buffer_capacity);
            state.context_caching = config.context_caching;
        });
    }

    /**
    Opens the appender, allocates a fresh buffer, clears the level lock, applies `level`
    and writes the init banner.  Caching is off while the banner is written; callers turn
    it back on afterwards.
    */
    fn initialize(
        &self,
        state: &mut State,
        appender: Arc<dyn Appender>,
        level: Severity,
        capacity: usize,
    ) {
        if let Err(e) = appender.open_for_writing() {
            report_internal("could not open appender", &e);
        }
        state.appender = Some(appender);
        state.capacity = capacity;
        state.buffer = Some(ContextRingBuffer::new(capacity));
        state.context_caching = false;
        state.policy.unlock();
        state.policy.set_level(level);
        propagate_level(state);
        if level > Severity::Disabled {
            self.emit_no_cache(state, level, INIT_TAG, INIT_BANNER);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.read(|state| state.appender.is_some())
    }

    /// The bound appender, if the facility has been initialized.
    pub fn appender(&self) -> Option<Arc<dyn Appender>> {
        self.read(|state| state.appender.clone())
    }

    /**
    Consumes the facility, discarding any retained history and asking the appender to close.
    */
    pub fn shutdown(self) {
        let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
        if let Some(appender) = state.appender {
            if let Err(e) = appender.close() {
                report_internal("could not close appender", &e);
            }
        }
    }

    /// Asks the appender to erase what it has persisted.  The facility stays initialized.
    pub fn delete_log(&self) {
        if let Some(appender) = self.appender() {
            if let Err(e) = appender.delete() {
                report_internal("could not delete log", &e);
            }
        }
    }

    /// Reads back what the appender has recorded.
    pub fn current_log_content(&self) -> Result<LogContent, Error> {
        let appender = self.appender().ok_or(Error::NotInitialized)?;
        Ok(appender.log_content()?)
    }

    // ------------------------------------------------------------------
    // Configuration

    /// Sets the active level.  Ignored while the level is locked.
    pub fn set_level(&self, level: Severity) {
        self.update("set_level", |state| {
            if state.policy.set_level(level) {
                propagate_level(state);
            }
        });
    }

    /// Sets the active level and locks it until [`Self::unlock_level`].
    pub fn lock_level(&self, level: Severity) {
        self.update("lock_level", |state| {
            state.policy.lock_level(level);
            propagate_level(state);
        });
    }

    pub fn unlock_level(&self) {
        self.update("unlock_level", |state| state.policy.unlock());
    }

    pub fn level(&self) -> Severity {
        self.read(|state| state.policy.level())
    }

    pub fn is_level_locked(&self) -> bool {
        self.read(|state| state.policy.is_locked())
    }

    /**
    Records the most verbose level the host would ever want cached.

    Once the active level reaches it, caching stops: those messages are already being
    emitted directly.
    */
    pub fn set_client_max_level(&self, level: Severity) {
        self.update("set_client_max_level", |state| {
            state.policy.set_client_max_level(level);
        });
    }

    pub fn client_max_level(&self) -> Severity {
        self.read(|state| state.policy.client_max_level())
    }

    /// Turns error-context caching on or off.  Retained messages are kept either way.
    pub fn enable_context_caching(&self, enabled: bool) {
        self.update("enable_context_caching", |state| {
            state.context_caching = enabled;
        });
    }

    pub fn is_context_caching(&self) -> bool {
        self.read(|state| state.context_caching)
    }

    /// In release mode emitted lines reach only the appender, not the console.
    pub fn set_release(&self, release: bool) {
        self.update("set_release", |state| state.release = release);
    }

    pub fn is_release(&self) -> bool {
        self.read(|state| state.release)
    }

    /**
    Whether a message at `level` would be emitted or cached right now.

    Lets callers skip formatting work for messages that would go nowhere.
    */
    pub fn is_interested(&self, level: Severity) -> bool {
        self.read(|state| {
            if state.appender.is_none() {
                return false;
            }
            let cached = state.context_caching
                && level != Severity::Error
                && !state.policy.caching_is_pointless()
                && state.capacity > 0;
            state.policy.admits(level) || cached
        })
    }

    // ------------------------------------------------------------------
    // Logging

    /// Logs `[tag] message` at `level`.
    pub fn log(&self, level: Severity, tag: &str, message: &str) {
        self.write_message(level, level.tag(), &format!("[{tag}] {message}"));
    }

    /// Logs `message` verbatim at `level`.
    pub fn log_message(&self, level: Severity, message: &str) {
        self.write_message(level, level.tag(), message);
    }

    /**
    Logs `[tag] message(summary)` at `level`, followed by a second line holding the
    formatted trace of `cause`.
    */
    pub fn log_with_cause(
        &self,
        level: Severity,
        tag: &str,
        message: &str,
        cause: &dyn std::error::Error,
    ) {
        self.write_message(level, level.tag(), &format!("[{tag}] {message}({cause})"));
        self.write_message(level, level.tag(), &self.format_cause(cause));
    }

    /// The trace text logged on the line after a message with a cause.
    pub fn format_cause(&self, cause: &dyn std::error::Error) -> String {
        self.formatter.format(cause)
    }

    pub fn error(&self, message: &str) {
        self.log_message(Severity::Error, message);
    }

    pub fn error_tagged(&self, tag: &str, message: &str) {
        self.log(Severity::Error, tag, message);
    }

    pub fn error_with_cause(&self, tag: &str, message: &str, cause: &dyn std::error::Error) {
        self.log_with_cause(Severity::Error, tag, message, cause);
    }

    pub fn info(&self, message: &str) {
        self.log_message(Severity::Info, message);
    }

    pub fn info_tagged(&self, tag: &str, message: &str) {
        self.log(Severity::Info, tag, message);
    }

    pub fn info_with_cause(&self, tag: &str, message: &str, cause: &dyn std::error::Error) {
        self.log_with_cause(Severity::Info, tag, message, cause);
    }

    pub fn debug(&self, message: &str) {
        self.log_message(Severity::Debug, message);
    }

    pub fn debug_tagged(&self, tag: &str, message: &str) {
        self.log(Severity::Debug, tag, message);
    }

    pub fn debug_with_cause(&self, tag: &str, message: &str, cause: &dyn std::error::Error) {
        self.log_with_cause(Severity::Debug, tag, message, cause);
    }

    pub fn trace(&self, message: &str) {
        self.log_message(Severity::Trace, message);
    }

    pub fn trace_tagged(&self, tag: &str, message: &str) {
        self.log(Severity::Trace, tag, message);
    }

    pub fn trace_with_cause(&self, tag: &str, message: &str, cause: &dyn std::error::Error) {
        self.log_with_cause(Severity::Trace, tag, message, cause);
    }

    pub fn verbose(&self, message: &str) {
        self.log_message(Severity::Verbose, message);
    }

    pub fn verbose_tagged(&self, tag: &str, message: &str) {
        self.log(Severity::Verbose, tag, message);
    }

    pub fn verbose_with_cause(&self, tag: &str, message: &str, cause: &dyn std::error::Error) {
        self.log_with_cause(Severity::Verbose, tag, message, cause);
    }

    pub fn warn(&self, message: &str) {
        self.log_message(Severity::Warn, message);
    }

    pub fn warn_tagged(&self, tag: &str, message: &str) {
        self.log(Severity::Warn, tag, message);
    }

    pub fn warn_with_cause(&self, tag: &str, message: &str, cause: &dyn std::error::Error) {
        self.log_with_cause(Severity::Warn, tag, message, cause);
    }

    /// Warning with a cause and no message text: `[tag] (summary)` plus the trace line.
    pub fn warn_cause(&self, tag: &str, cause: &dyn std::error::Error) {
        self.write_message(Severity::Warn, Severity::Warn.tag(), &format!("[{tag}] ({cause})"));
        self.write_message(Severity::Warn, Severity::Warn.tag(), &self.format_cause(cause));
    }

    // ------------------------------------------------------------------
    // Profiling

    /// Reports the process's resident memory.  Emitted whenever logging is enabled.
    pub fn memory_stats(&self, message: &str) {
        self.write_message(Severity::Profiling, MEMORY_TAG, &memory_line(message));
    }

    pub fn memory_stats_tagged(&self, tag: &str, message: &str) {
        self.memory_stats(&format!("{tag}::{message}"));
    }

    /**
    Reports milliseconds elapsed since the first time-statistics call.

    The first call starts the clock and reports zero.
    */
    pub fn time_stats(&self, message: &str) {
        let Some(mut state) = self.lock() else {
            report_internal("nested call from the appender dropped", &message);
            return;
        };
        let now = Instant::now();
        let elapsed = match state.profiling_epoch {
            Some(epoch) => now.duration_since(epoch).as_millis(),
            None => {
                state.profiling_epoch = Some(now);
                0
            }
        };
        let line = format!("{message}: {elapsed} [msec]");
        self.write_locked(&mut state, Severity::Profiling, TIME_TAG, &line);
    }

    pub fn time_stats_tagged(&self, tag: &str, message: &str) {
        self.time_stats(&format!("{tag}::{message}"));
    }

    /// [`Self::memory_stats`] followed by [`Self::time_stats`].
    pub fn stats(&self, message: &str) {
        self.memory_stats(message);
        self.time_stats(message);
    }

    pub fn stats_tagged(&self, tag: &str, message: &str) {
        self.memory_stats_tagged(tag, message);
        self.time_stats_tagged(tag, message);
    }

    // ------------------------------------------------------------------
    // Internals

    fn write_message(&self, level: Severity, level_tag: &str, message: &str) {
        match self.lock() {
            Some(mut state) => self.write_locked(&mut state, level, level_tag, message),
            None => report_internal("nested call from the appender dropped", &message),
        }
    }

    fn write_locked(&self, state: &mut State, level: Severity, level_tag: &str, message: &str) {
        if state.appender.is_none() {
            return;
        }
        if state.context_caching {
            self.cache_message(state, level, message);
        }
        self.emit_no_cache(state, level, level_tag, message);
    }

    fn cache_message(&self, state: &mut State, level: Severity, message: &str) {
        let Some(mut buffer) = state.buffer.take() else {
            return;
        };
        if level == Severity::Error {
            self.flush_context(state, &mut buffer);
        } else if !state.policy.caching_is_pointless() {
            buffer.push(message.to_string());
        }
        state.buffer = Some(buffer);
    }

    fn flush_context(&self, state: &State, buffer: &mut ContextRingBuffer) {
        if buffer.is_empty() {
            return;
        }
        self.emit_no_cache(state, Severity::Error, ERROR_CONTEXT_TAG, CONTEXT_SEPARATOR);
        for message in buffer.drain_in_order() {
            self.emit_no_cache(state, Severity::Error, ERROR_CONTEXT_TAG, message);
        }
        self.emit_no_cache(state, Severity::Error, ERROR_CONTEXT_TAG, CONTEXT_SEPARATOR);
        buffer.reset();
    }

    fn emit_no_cache(&self, state: &State, level: Severity, level_tag: &str, message: &str) {
        if !state.policy.admits(level) {
            return;
        }
        if let Some(appender) = &state.appender {
            if let Err(e) = appender.write(level_tag, message) {
                report_internal("appender write failed", &e);
            }
        }
        if !state.release {
            let mut record = LogRecord::new(level, level_tag);
            record.log_timestamp();
            record.log(message);
            if let Err(e) = self.console.write_record(&record) {
                report_internal("console write failed", &e);
            }
        }
    }
}

fn propagate_level(state: &State) {
    if let Some(appender) = &state.appender {
        appender.set_minimum_level(state.policy.level());
    }
}

fn memory_line(message: &str) -> String {
    match crate::sys::resident_memory_bytes() {
        Some(bytes) => format!("{message}:{bytes} [bytes]"),
        None => format!("{message}: unavailable"),
    }
}
