// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Logging calls never return these.  They show up on the [`Appender`](crate::Appender)
//! trait, where the facility catches them, and on the few host-facing retrieval
//! operations such as
//! [`ContextLogger::current_log_content`](crate::ContextLogger::current_log_content).

use thiserror::Error;

/// Failure reported by an [`Appender`](crate::Appender).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppenderError {
    #[error("appender I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("appender is not open for writing")]
    Closed,
    #[error("appender does not support {0}")]
    Unsupported(&'static str),
}

/// Failure of a host-facing facility operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("logging facility has not been initialized")]
    NotInitialized,
    #[error(transparent)]
    Appender(#[from] AppenderError),
}
