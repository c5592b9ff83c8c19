use core::{
    cell::UnsafeCell,
    hint::spin_loop,
    mem::MaybeUninit,
    sync::atomic::{AtomicU8, Ordering},
};

const UNINIT: u8 = 0;
const INITING: u8 = 1;
const READY: u8 = 2;

/// Write-once storage usable from a `static`.
///
/// Readers that find the cell empty get `None` instead of waiting, which is
/// what the IRQ handler needs: an interrupt that arrives before bring-up has
/// finished is simply ignored.
pub struct SyncOnceCell<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Default for SyncOnceCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SyncOnceCell<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINIT),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns `Some(&T)` if already initialized.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        if self.state.load(Ordering::Acquire) == READY {
            // SAFETY: READY guarantees the write is done
            Some(unsafe { &*(*self.value.get()).as_ptr() })
        } else {
            None
        }
    }

    /// Stores `value` if the cell is empty.
    ///
    /// # Errors
    /// Hands `value` back if the cell was already initialized or is being
    /// initialized concurrently.
    pub fn set(&self, value: T) -> Result<&T, T> {
        if self
            .state
            .compare_exchange(UNINIT, INITING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(value);
        }
        Ok(unsafe { self.publish(value) })
    }

    /// Initialize at most once and return `&T`.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        if let Some(v) = self.get() {
            return v;
        }

        if self
            .state
            .compare_exchange(UNINIT, INITING, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            return unsafe { self.publish(init()) };
        }

        // Someone else is initializing; wait until READY
        while self.state.load(Ordering::Acquire) != READY {
            spin_loop();
        }
        // SAFETY: READY
        unsafe { &*(*self.value.get()).as_ptr() }
    }

    /// # Safety
    /// The caller must have moved the state from `UNINIT` to `INITING`.
    unsafe fn publish(&self, value: T) -> &T {
        unsafe {
            (*self.value.get()).write(value);
        }
        // Publish value before marking READY
        self.state.store(READY, Ordering::Release);
        // SAFETY: just wrote it
        unsafe { &*(*self.value.get()).as_ptr() }
    }
}

impl<T> Drop for SyncOnceCell<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == READY {
            // SAFETY: READY means the value was written and never moved out.
            unsafe { self.value.get_mut().assume_init_drop() }
        }
    }
}

// Safety: shared after READY; initialization is single-writer.
unsafe impl<T: Sync + Send> Sync for SyncOnceCell<T> {}
unsafe impl<T: Send> Send for SyncOnceCell<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_reads_none() {
        let c: SyncOnceCell<u32> = SyncOnceCell::new();
        assert!(c.get().is_none());
    }

    #[test]
    fn set_succeeds_once() {
        let c = SyncOnceCell::new();
        assert_eq!(c.set(7), Ok(&7));
        assert_eq!(c.set(8), Err(8));
        assert_eq!(c.get(), Some(&7));
    }

    #[test]
    fn get_or_init_runs_initializer_once() {
        let c = SyncOnceCell::new();
        let mut calls = 0;
        assert_eq!(*c.get_or_init(|| {
            calls += 1;
            "first"
        }), "first");
        assert_eq!(*c.get_or_init(|| "second"), "first");
        assert_eq!(calls, 1);
    }

    #[test]
    fn drops_the_stored_value() {
        use std::rc::Rc;
        let rc = Rc::new(());
        {
            let c = SyncOnceCell::new();
            let _ = c.set(Rc::clone(&rc));
            assert_eq!(Rc::strong_count(&rc), 2);
        }
        assert_eq!(Rc::strong_count(&rc), 1);
    }
}
