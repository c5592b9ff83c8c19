use core::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    sync::atomic::{AtomicU8, Ordering},
};

const EMPTY: u8 = 0;
const INSTALLING: u8 = 1;
const IDLE: u8 = 2;
const BORROWED: u8 = 3;

/// Storage for state the IRQ handler mutates.
///
/// The main loop [`install`](Self::install)s the value once; afterwards
/// [`with`](Self::with) lends it out mutably to one caller at a time. A
/// caller that finds the cell empty or already borrowed gets `None` and
/// never waits, so the handler cannot spin on it.
pub struct HandlerCell<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

// Safety: the state machine hands out at most one `&mut T` at a time.
unsafe impl<T: Send> Sync for HandlerCell<T> {}
unsafe impl<T: Send> Send for HandlerCell<T> {}

impl<T> Default for HandlerCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandlerCell<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Stores `value` if the cell is empty.
    ///
    /// # Errors
    /// Hands `value` back if something was installed before.
    pub fn install(&self, value: T) -> Result<(), T> {
        if self
            .state
            .compare_exchange(EMPTY, INSTALLING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(value);
        }
        // SAFETY: INSTALLING excludes every other access.
        unsafe {
            (*self.value.get()).write(value);
        }
        self.state.store(IDLE, Ordering::Release);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self.state.load(Ordering::Acquire), IDLE | BORROWED)
    }

    /// Runs `f` on the stored value.
    ///
    /// Returns `None` without calling `f` if nothing is installed yet or
    /// the value is currently lent out.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        if self
            .state
            .compare_exchange(IDLE, BORROWED, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return None;
        }

        let _release = Release(&self.state);
        // SAFETY: BORROWED grants exclusive access until `_release` drops.
        let value = unsafe { (*self.value.get()).assume_init_mut() };
        Some(f(value))
    }
}

struct Release<'a>(&'a AtomicU8);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(IDLE, Ordering::Release);
    }
}

impl<T> Drop for HandlerCell<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == IDLE {
            // SAFETY: IDLE means a value was installed and is not borrowed.
            unsafe { self.value.get_mut().assume_init_drop() }
        }
    }
}
