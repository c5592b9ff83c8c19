use crate::tags::{self, code};
use crate::{MailboxBuffer, MailboxChannel, MailboxError};

/// Location of one tag's value buffer inside a message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TagSlot {
    tag: u32,
    /// Index of the tag's length-and-status word.
    header: usize,
    /// Index of the first value word.
    value: usize,
    words: usize,
}

impl TagSlot {
    /// The tag identifier this slot was created for.
    #[must_use]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Index of the first value word in the buffer.
    #[must_use]
    pub const fn value_index(&self) -> usize {
        self.value
    }

    /// Size of the value buffer in words.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words == 0
    }
}

/// Builds a property message into a [`MailboxBuffer`].
///
/// ```
/// use kernel_mailbox::{MailboxBuffer, PropertyMessage, tags};
///
/// let mut buffer = MailboxBuffer::new();
/// let mut msg = PropertyMessage::new(&mut buffer);
/// let slot = msg.tag(tags::GET_ARM_MEMORY, &[], 2)?;
/// assert_eq!(slot.value_index(), 5);
/// assert_eq!(msg.finish(), 8 * 4);
/// # Ok::<(), kernel_mailbox::MailboxError>(())
/// ```
pub struct PropertyMessage<'b> {
    buffer: &'b mut MailboxBuffer,
    cursor: usize,
}

impl<'b> PropertyMessage<'b> {
    const HEADER_WORDS: usize = 2;
    const TAG_HEADER_WORDS: usize = 3;

    pub fn new(buffer: &'b mut MailboxBuffer) -> Self {
        let words = buffer.words_mut();
        words.fill(0);
        words[1] = code::REQUEST;
        Self {
            buffer,
            cursor: Self::HEADER_WORDS,
        }
    }

    /// Appends a tag with `request` as its leading value words.
    ///
    /// The value buffer is `value_words` long, or as long as `request` if
    /// that is larger; the rest is zeroed for the response.
    ///
    /// # Errors
    /// [`MailboxError::MessageTooLarge`] if the tag and the end tag would
    /// not fit.
    pub fn tag(
        &mut self,
        tag: u32,
        request: &[u32],
        value_words: usize,
    ) -> Result<TagSlot, MailboxError> {
        let value_words = value_words.max(request.len());
        let header = self.cursor + 1;
        let value = self.cursor + Self::TAG_HEADER_WORDS;
        let end = value + value_words;
        if end >= MailboxBuffer::CAPACITY {
            return Err(MailboxError::MessageTooLarge);
        }
        let value_bytes =
            u32::try_from(value_words * 4).map_err(|_| MailboxError::MessageTooLarge)?;

        let words = self.buffer.words_mut();
        words[self.cursor] = tag;
        words[header] = value_bytes;
        words[header + 1] = code::REQUEST;
        words[value..value + request.len()].copy_from_slice(request);
        self.cursor = end;

        Ok(TagSlot {
            tag,
            header: header + 1,
            value,
            words: value_words,
        })
    }

    /// Writes the end tag and the total size; returns the size in bytes.
    pub fn finish(&mut self) -> u32 {
        let words = self.buffer.words_mut();
        words[self.cursor] = tags::END;
        // At most CAPACITY words, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let bytes = ((self.cursor + 1) * 4) as u32;
        words[0] = bytes;
        bytes
    }

    /// Finishes the message, exchanges it over `channel` and checks the
    /// response code.
    ///
    /// # Errors
    /// Transport errors from the channel, [`MailboxError::ParseError`] if
    /// the firmware rejected the message, [`MailboxError::NotAcknowledged`]
    /// for any other response code.
    pub fn submit<C: MailboxChannel + ?Sized>(
        mut self,
        channel: &mut C,
    ) -> Result<Response<'b>, MailboxError> {
        let size = self.finish();
        log::trace!("mailbox request of {size} bytes");

        let buffer = self.buffer;
        channel.exchange(buffer)?;

        match buffer.word(1) {
            Some(code::SUCCESS) => Ok(Response { buffer }),
            Some(code::PARSE_ERROR) => Err(MailboxError::ParseError),
            other => Err(MailboxError::NotAcknowledged(other.unwrap_or_default())),
        }
    }
}

/// An acknowledged property message.
pub struct Response<'b> {
    buffer: &'b MailboxBuffer,
}

impl Response<'_> {
    /// Word `index` of the value buffer at `slot`.
    #[must_use]
    pub fn value(&self, slot: TagSlot, index: usize) -> Option<u32> {
        if index >= slot.words {
            return None;
        }
        self.buffer.word(slot.value + index)
    }

    /// Word `index` of a tag the firmware answered.
    ///
    /// # Errors
    /// [`MailboxError::Unanswered`] if the tag's response bit is clear, so
    /// its value buffer still holds the request; [`MailboxError::ParseError`]
    /// if `index` lies outside the slot.
    pub fn answer(&self, slot: TagSlot, index: usize) -> Result<u32, MailboxError> {
        if !self.answered(slot) {
            return Err(MailboxError::Unanswered(slot.tag));
        }
        self.value(slot, index).ok_or(MailboxError::ParseError)
    }

    /// Whether the firmware marked the tag at `slot` as answered.
    #[must_use]
    pub fn answered(&self, slot: TagSlot) -> bool {
        self.buffer
            .word(slot.header)
            .is_some_and(|w| w & code::TAG_RESPONSE != 0)
    }
}
