// SPDX-License-Identifier: MIT OR Apache-2.0

//! The active level, its lock, and the client's maximum cached level.
//!
//! This is pure state.  Propagating level changes to the appender is the
//! facility's job, so every mutator reports whether the level actually changed.

use crate::level::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelPolicy {
    current: Severity,
    locked: bool,
    client_max: Severity,
}

impl LevelPolicy {
    pub const fn new(level: Severity) -> Self {
        Self {
            current: level,
            locked: false,
            client_max: Severity::Trace,
        }
    }

    pub const fn level(&self) -> Severity {
        self.current
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn client_max_level(&self) -> Severity {
        self.client_max
    }

    /**
    Sets the active level unless it is locked.

    Returns `true` if the level was applied.
    */
    pub fn set_level(&mut self, level: Severity) -> bool {
        if self.locked {
            return false;
        }
        self.current = level;
        true
    }

    /// Sets the active level and locks it, regardless of any existing lock.
    pub fn lock_level(&mut self, level: Severity) {
        self.current = level;
        self.locked = true;
    }

    /// Clears the lock.  The level is left as it is.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn set_client_max_level(&mut self, level: Severity) {
        self.client_max = level;
    }

    /// Whether the active level is the same as or more permissive than anything the
    /// client wants cached.
    pub fn caching_is_pointless(&self) -> bool {
        self.current >= self.client_max
    }

    /// The emit gate for a message at `level`.
    pub const fn admits(&self, level: Severity) -> bool {
        self.current.admits(level)
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::LevelPolicy;
    use crate::level::Severity;

    #[test]
    fn lock_blocks_set_level() {
        let mut policy = LevelPolicy::new(Severity::Info);
        policy.lock_level(Severity::Warn);
        assert!(!policy.set_level(Severity::Error));
        assert_eq!(policy.level(), Severity::Warn);

        policy.unlock();
        assert_eq!(policy.level(), Severity::Warn);
        assert!(policy.set_level(Severity::Error));
        assert_eq!(policy.level(), Severity::Error);
    }

    #[test]
    fn lock_overrides_existing_lock() {
        let mut policy = LevelPolicy::default();
        policy.lock_level(Severity::Debug);
        policy.lock_level(Severity::Trace);
        assert_eq!(policy.level(), Severity::Trace);
        assert!(policy.is_locked());
    }

    #[test]
    fn caching_gate_uses_client_max() {
        let mut policy = LevelPolicy::new(Severity::Info);
        assert_eq!(policy.client_max_level(), Severity::Trace);
        assert!(!policy.caching_is_pointless());

        policy.set_level(Severity::Trace);
        assert!(policy.caching_is_pointless());

        policy.set_client_max_level(Severity::Warn);
        assert!(!policy.caching_is_pointless());
    }
}
