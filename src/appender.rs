// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::AppenderError;
use crate::level::Severity;
use std::fmt::Debug;
use std::path::PathBuf;

/**
The destination that persists or displays formatted log lines.

The facility holds an `Arc<dyn Appender>` it does not own.  It opens the appender when
it is initialized and asks it to close on shutdown, but never drops the underlying
storage itself.

All methods take `&self`; implementations use interior mutability and must tolerate
being called from any thread.  The facility serializes its own calls, so an appender
never sees two writes interleave.
*/
pub trait Appender: Debug + Send + Sync {
    /**
    Prepares the destination for writing.  Called once per initialization.
    */
    fn open_for_writing(&self) -> Result<(), AppenderError>;

    /**
    Releases the destination.  Persisted data stays where it is.
    */
    fn close(&self) -> Result<(), AppenderError>;

    /**
    Erases whatever the appender has persisted so far.
    */
    fn delete(&self) -> Result<(), AppenderError>;

    /**
    Informs the appender of the facility's active level.

    The facility has already filtered by the time [Self::write] is called; this is for
    appenders that want to record or mirror the setting.
    */
    fn set_minimum_level(&self, level: Severity);

    /**
    Writes one line.

    `level_tag` is the display tag (`"ERROR"`, `"[Error Context]"`, `"PROFILING-TIME"`, ...),
    not necessarily the name of a [Severity].
    */
    fn write(&self, level_tag: &str, message: &str) -> Result<(), AppenderError>;

    /**
    Reads back what has been recorded, for diagnostics retrieval.
    */
    fn log_content(&self) -> Result<LogContent, AppenderError>;
}

/// Recorded log data as handed back by [Appender::log_content].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogContent {
    /// The content itself, one line per record
    Text(String),
    /// A file holding the content
    File(PathBuf),
}

impl LogContent {
    pub fn content_type(&self) -> &'static str {
        match self {
            LogContent::Text(_) => "text/plain",
            LogContent::File(_) => "application/octet-stream",
        }
    }
}

/*
Boilerplate notes.

# Appender

Clone doesn't make sense; hosts share appenders through Arc.
PartialEq/Hash: unclear whether we mean the destination or the data, skip.
Default: an appender needs to know where it writes.

# LogContent

Plain data, so Clone/Eq/Hash are derived.
*/
