use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// A word shared between the interrupt handler and the main loop.
///
/// Exactly one [`SignalWriter`] can ever be claimed; any number of
/// [`SignalReader`]s may observe the value. Writes are whole-word stores,
/// so a reader always sees either the previous or the new value and never
/// a mix of both. The writer has no read-modify-write operation; it can only
/// overwrite.
///
/// ```
/// use kernel_sync::SharedSignal;
///
/// static SIGNAL: SharedSignal = SharedSignal::new(1);
///
/// let mut writer = SIGNAL.claim_writer().expect("first claim");
/// assert!(SIGNAL.claim_writer().is_none());
///
/// let reader = SIGNAL.reader();
/// writer.publish(-1);
/// assert_eq!(reader.get(), -1);
/// ```
#[derive(Debug)]
pub struct SharedSignal {
    value: AtomicI32,
    writer_claimed: AtomicBool,
}

impl SharedSignal {
    #[must_use]
    pub const fn new(initial: i32) -> Self {
        Self {
            value: AtomicI32::new(initial),
            writer_claimed: AtomicBool::new(false),
        }
    }

    /// Hands out the one and only writer.
    ///
    /// Returns `None` if a writer was claimed before, even if it has since
    /// been dropped.
    #[must_use]
    pub fn claim_writer(&self) -> Option<SignalWriter<'_>> {
        self.writer_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SignalWriter { cell: &self.value })
    }

    /// Returns a read-only handle.
    #[must_use]
    pub const fn reader(&self) -> SignalReader<'_> {
        SignalReader { cell: &self.value }
    }
}

/// The unique write handle of a [`SharedSignal`].
#[derive(Debug)]
pub struct SignalWriter<'a> {
    cell: &'a AtomicI32,
}

impl SignalWriter<'_> {
    /// Overwrites the shared value.
    #[inline]
    pub fn publish(&mut self, value: i32) {
        self.cell.store(value, Ordering::Release);
    }
}

/// A read handle of a [`SharedSignal`].
#[derive(Debug, Copy, Clone)]
pub struct SignalReader<'a> {
    cell: &'a AtomicI32,
}

impl SignalReader<'_> {
    /// Loads the current value with a single word-sized load.
    #[inline]
    #[must_use]
    pub fn get(&self) -> i32 {
        self.cell.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_sees_initial_value() {
        let s = SharedSignal::new(1);
        assert_eq!(s.reader().get(), 1);
    }

    #[test]
    fn writer_can_be_claimed_once() {
        let s = SharedSignal::new(0);
        let w = s.claim_writer();
        assert!(w.is_some());
        drop(w);
        assert!(s.claim_writer().is_none());
    }

    #[test]
    fn publish_overwrites() {
        let s = SharedSignal::new(1);
        let mut w = s.claim_writer().unwrap();
        w.publish(-1);
        w.publish(-1);
        assert_eq!(s.reader().get(), -1);
        w.publish(1);
        assert_eq!(s.reader().get(), 1);
    }
}
