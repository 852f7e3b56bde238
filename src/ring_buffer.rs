// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-capacity history of recent messages.
//!
//! [`ContextRingBuffer`] keeps the last `N` messages pushed into it.  Pushing into a
//! full buffer overwrites the oldest entry; there is no "full" error.  The buffer is
//! the black box recorder behind error-context dumps: messages accumulate while
//! nothing interesting happens, and on an error the facility walks them oldest-first
//! with [`ContextRingBuffer::drain_in_order`] and then calls [`ContextRingBuffer::reset`].
//!
//! # Layout
//!
//! Backing storage is indexed `0..N`.  `head` is the oldest retained entry and `tail`
//! is the next write position, both modulo `N`.  Because `head == tail` holds both
//! when the buffer is empty and when it holds exactly `N` entries, the number of
//! retained entries is tracked separately.
//!
//! Storage grows lazily up to `N` slots, so a large capacity costs nothing until it is
//! used.  [`ContextRingBuffer::reset`] only moves the cursors; old strings stay in their
//! slots until overwritten but are no longer reachable.
//!
//! ```
//! use contextlog::ContextRingBuffer;
//!
//! let mut buffer = ContextRingBuffer::new(4);
//! for message in ["m1", "m2", "m3", "m4", "m5"] {
//!     buffer.push(message.to_string());
//! }
//! let retained: Vec<&str> = buffer.drain_in_order().collect();
//! assert_eq!(retained, ["m2", "m3", "m4", "m5"]);
//! ```

use std::iter::FusedIterator;

/// Default number of messages retained for an error dump.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct ContextRingBuffer {
    slots: Vec<String>,
    capacity: usize,
    head: usize,
    tail: usize,
    len: usize,
}

impl ContextRingBuffer {
    /**
    Creates an empty buffer retaining at most `capacity` messages.

    A zero capacity is allowed and retains nothing.
    */
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /**
    Appends a message, discarding the oldest one if the buffer is full.
    */
    pub fn push(&mut self, message: String) {
        if self.capacity == 0 {
            return;
        }
        if self.tail < self.slots.len() {
            self.slots[self.tail] = message;
        } else {
            // slots only ever grow at the write cursor, so tail == slots.len() here
            self.slots.push(message);
        }
        self.tail = (self.tail + 1) % self.capacity;
        if self.len == self.capacity {
            // tail just overwrote the oldest entry
            self.head = (self.head + 1) % self.capacity;
        } else {
            self.len += 1;
        }
    }

    /**
    Iterates the retained messages, oldest first.

    The iterator borrows the buffer and does not clear it; call [`Self::reset`]
    once the messages have been consumed.
    */
    pub fn drain_in_order(&self) -> DrainInOrder<'_> {
        DrainInOrder {
            buffer: self,
            index: self.head,
            remaining: self.len,
        }
    }

    /// Forgets every retained message in O(1).
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

impl Default for ContextRingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Oldest-first view over a [`ContextRingBuffer`].
#[derive(Debug, Clone)]
pub struct DrainInOrder<'a> {
    buffer: &'a ContextRingBuffer,
    index: usize,
    remaining: usize,
}

impl<'a> Iterator for DrainInOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let message = self.buffer.slots[self.index].as_str();
        self.index = (self.index + 1) % self.buffer.capacity;
        self.remaining -= 1;
        Some(message)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DrainInOrder<'_> {}
impl FusedIterator for DrainInOrder<'_> {}
