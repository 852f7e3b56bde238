// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.
//!
//! The numeric values are part of the contract: a message is emitted when the
//! active level's value is greater than or equal to the message's value. This
//! means `Warn` (5) only passes when the active level is `Warn`, and `Verbose`
//! (4) passes under both `Verbose` and `Warn`. The table is kept literally.

use std::fmt::Display;

/// Classification of a log message, and of the active threshold.
///
/// Variants are declared in discriminant order, so the derived ordering matches
/// the numeric comparison used by the emit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
pub enum Severity {
    /// Internal pseudo-level for memory/time snapshots
    Profiling = -2,
    /// Suppresses everything
    Disabled = -1,
    Error = 0,
    #[default]
    Info = 1,
    Debug = 2,
    Trace = 3,
    Verbose = 4,
    Warn = 5,
}

impl Severity {
    /// The literal numeric value of the level.
    pub const fn value(self) -> i8 {
        self as i8
    }

    /**
    Whether a message at `message` passes the gate when `self` is the active level.

    `Profiling` is special-cased: it is emitted whenever logging is enabled at all,
    regardless of where its literal value sorts.
    */
    pub const fn admits(self, message: Severity) -> bool {
        match message {
            Severity::Profiling => !matches!(self, Severity::Disabled),
            _ => self.value() >= message.value(),
        }
    }

    /// The tag written next to messages at this level.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Profiling => "PROFILING",
            Severity::Disabled => "DISABLED",
            Severity::Error => "ERROR",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
            Severity::Verbose => "VERBOSE",
            Severity::Warn => "WARN",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/*
Boilerplate notes.

Copy/Clone/Eq/Hash: it's a plain tag.
Ord: derived on discriminants, which is the literal table.  Don't reorder variants.
Default: Info, which is the level a facility starts at.
From<i8>: not provided; hosts should name levels rather than pass numbers around.
*/

#[cfg(test)]
mod tests {
    use super::Severity;

    #[test]
    fn literal_gate_table() {
        assert!(Severity::Info.admits(Severity::Error));
        assert!(Severity::Info.admits(Severity::Info));
        assert!(!Severity::Info.admits(Severity::Debug));
        assert!(Severity::Trace.admits(Severity::Debug));
        // verbose and warn sort after trace
        assert!(!Severity::Trace.admits(Severity::Verbose));
        assert!(!Severity::Trace.admits(Severity::Warn));
        assert!(Severity::Warn.admits(Severity::Verbose));
        assert!(!Severity::Verbose.admits(Severity::Warn));
        assert!(!Severity::Error.admits(Severity::Warn));
    }

    #[test]
    fn disabled_suppresses_everything() {
        for level in [
            Severity::Error,
            Severity::Info,
            Severity::Debug,
            Severity::Trace,
            Severity::Verbose,
            Severity::Warn,
            Severity::Profiling,
        ] {
            assert!(!Severity::Disabled.admits(level), "{level} should be suppressed");
        }
    }

    #[test]
    fn profiling_passes_when_enabled() {
        assert!(Severity::Error.admits(Severity::Profiling));
        assert!(Severity::Warn.admits(Severity::Profiling));
    }

    #[test]
    fn ordering_follows_values() {
        assert!(Severity::Profiling < Severity::Disabled);
        assert!(Severity::Disabled < Severity::Error);
        assert!(Severity::Trace < Severity::Verbose);
        assert!(Severity::Verbose < Severity::Warn);
        assert_eq!(Severity::Warn.value(), 5);
    }
}
