//! # VideoCore Mailbox
//!
//! The ARM core talks to the VideoCore firmware through a pair of hardware
//! mailboxes. A request is a 16-byte aligned buffer of 32-bit words; its
//! address, with a channel number in the low four bits, is posted to the
//! write mailbox. The firmware answers in place and posts the same word back
//! on the read mailbox.
//!
//! ## Property Messages
//!
//! Channel 8 carries property-tag messages:
//!
//! ```text
//! word 0        total size in bytes
//! word 1        0 (request) / 0x8000_0000 (success) / 0x8000_0001 (parse error)
//! ┌ tag id
//! │ value buffer size in bytes
//! │ 0 (request) / 0x8000_0000 | response length
//! └ value buffer words ...
//! ... more tags ...
//! 0             end tag
//! ```
//!
//! [`PropertyMessage`] lays out such a message and remembers where each
//! tag's value buffer starts, so responses are read back from exactly the
//! words the request used.
//!
//! ## Layers
//!
//! * [`MailboxChannel`]: the request/response transport. [`Mailbox`] drives
//!   the hardware registers; tests substitute their own responder.
//! * [`PropertyMessage`] / [`Response`]: message encoding and the response
//!   code check.
//! * [`negotiate_framebuffer`]: the framebuffer allocation sequence.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod buffer;
mod channel;
mod framebuffer;
mod message;
pub mod tags;

pub use buffer::MailboxBuffer;
pub use channel::{Mailbox, MailboxChannel, PROPERTY_CHANNEL};
pub use framebuffer::{FramebufferRequest, negotiate_framebuffer};
pub use message::{PropertyMessage, Response, TagSlot};

use kernel_info::display::DescriptorError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MailboxError {
    /// The buffer lies outside the 32-bit window the VideoCore can see.
    #[error("mailbox buffer is not addressable by the VideoCore")]
    Unaddressable,
    #[error("mailbox request not acknowledged (response code {0:#010x})")]
    NotAcknowledged(u32),
    #[error("VideoCore could not parse the request")]
    ParseError,
    /// The message was acknowledged but this tag was left unanswered.
    #[error("VideoCore did not answer tag {0:#010x}")]
    Unanswered(u32),
    #[error("property message does not fit the mailbox buffer")]
    MessageTooLarge,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum NegotiationError {
    #[error(transparent)]
    Mailbox(#[from] MailboxError),
    #[error("VideoCore returned an unusable framebuffer: {0}")]
    Descriptor(#[from] DescriptorError),
}
