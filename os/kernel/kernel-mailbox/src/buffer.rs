/// A property message buffer, aligned so its address can share a word with
/// the channel number.
#[repr(C, align(16))]
pub struct MailboxBuffer {
    words: [u32; Self::CAPACITY],
}

impl Default for MailboxBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MailboxBuffer {
    /// Capacity in 32-bit words.
    pub const CAPACITY: usize = 64;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: [0; Self::CAPACITY],
        }
    }

    /// Reads word `index` as the firmware left it.
    ///
    /// The read is volatile: the firmware writes the buffer behind the
    /// compiler's back.
    #[must_use]
    pub fn word(&self, index: usize) -> Option<u32> {
        let word = self.words.get(index)?;
        // SAFETY: `word` is a valid, aligned reference into the buffer.
        Some(unsafe { core::ptr::read_volatile(word) })
    }

    /// Raw access for encoders and for the responder side of a channel.
    pub const fn words_mut(&mut self) -> &mut [u32; Self::CAPACITY] {
        &mut self.words
    }

    #[must_use]
    pub const fn as_ptr(&self) -> *const u32 {
        self.words.as_ptr()
    }
}
