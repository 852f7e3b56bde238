// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
A minimal exclusive spinlock for the global logger slot.

The wasm main thread can't block, so the slot can't sit behind a `Mutex`.  Critical
sections are a handful of instructions (swap or clone an `Option<Arc<_>>`); keep them
that way.  Never log while holding it.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

pub struct Spinlock<T> {
    data: UnsafeCell<T>,
    locked: AtomicBool,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            locked: AtomicBool::new(false),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        while self
            .locked
            .compare_exchange_weak(false, true, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        let _release = ReleaseOnDrop(&self.locked);
        // SAFETY: the flag is ours until _release drops
        unsafe { f(&mut *self.data.get()) }
    }
}

//unlocks even if the closure panics
struct ReleaseOnDrop<'a>(&'a AtomicBool);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Release);
    }
}

#[cfg(test)]
mod tests {
    use super::Spinlock;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn counts_under_contention() {
        let lock = Arc::new(Spinlock::new(0u32));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = lock.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        lock.with(|n| *n += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(lock.with(|n| *n), 4000);
    }

    #[test]
    fn released_after_panic() {
        let lock = Spinlock::new(1u8);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            lock.with(|_| panic!("inside"));
        }));
        assert!(result.is_err());
        assert_eq!(lock.with(|n| *n), 1);
    }
}
