// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::facility::ContextLogger;
use std::error::Error;

/**
The short-form logging capability some hosts expect to be handed.

Frameworks that want "something that can log" (a crash reporter, a plugin host) take a
`&dyn LogSink` or `Arc<dyn LogSink>`.  [ContextLogger] implements it by forwarding to
its tagged methods, so the value passed around is the same facility the rest of the
application logs through.
*/
pub trait LogSink: Send + Sync {
    fn d(&self, tag: &str, message: &str);
    fn d_with(&self, tag: &str, message: &str, cause: &dyn Error);
    fn i(&self, tag: &str, message: &str);
    fn i_with(&self, tag: &str, message: &str, cause: &dyn Error);
    fn w(&self, tag: &str, message: &str);
    fn w_with(&self, tag: &str, message: &str, cause: &dyn Error);
    fn w_cause(&self, tag: &str, cause: &dyn Error);
    fn e(&self, tag: &str, message: &str);
    fn e_with(&self, tag: &str, message: &str, cause: &dyn Error);
    fn v(&self, tag: &str, message: &str);
    fn v_with(&self, tag: &str, message: &str, cause: &dyn Error);

    /// The trace text that would be logged for `cause`.
    fn stack_trace_string(&self, cause: &dyn Error) -> String;
}

impl LogSink for ContextLogger {
    fn d(&self, tag: &str, message: &str) {
        self.debug_tagged(tag, message);
    }

    fn d_with(&self, tag: &str, message: &str, cause: &dyn Error) {
        self.debug_with_cause(tag, message, cause);
    }

    fn i(&self, tag: &str, message: &str) {
        self.info_tagged(tag, message);
    }

    fn i_with(&self, tag: &str, message: &str, cause: &dyn Error) {
        self.info_with_cause(tag, message, cause);
    }

    fn w(&self, tag: &str, message: &str) {
        self.warn_tagged(tag, message);
    }

    fn w_with(&self, tag: &str, message: &str, cause: &dyn Error) {
        self.warn_with_cause(tag, message, cause);
    }

    fn w_cause(&self, tag: &str, cause: &dyn Error) {
        self.warn_cause(tag, cause);
    }

    fn e(&self, tag: &str, message: &str) {
        self.error_tagged(tag, message);
    }

    fn e_with(&self, tag: &str, message: &str, cause: &dyn Error) {
        self.error_with_cause(tag, message, cause);
    }

    fn v(&self, tag: &str, message: &str) {
        self.verbose_tagged(tag, message);
    }

    fn v_with(&self, tag: &str, message: &str, cause: &dyn Error) {
        self.verbose_with_cause(tag, message, cause);
    }

    fn stack_trace_string(&self, cause: &dyn Error) -> String {
        self.format_cause(cause)
    }
}
