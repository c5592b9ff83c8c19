//! # Register Layouts
//!
//! Bit-level models of registers whose fields are read or composed by
//! drivers. Reserved bits are kept private and default to zero.

use bitfield_struct::bitfield;

/// Mailbox status register (`mailbox::STATUS`).
#[bitfield(u32)]
pub struct MailboxStatus {
    /// Bits 0–29 — Reserved.
    #[bits(30, default = 0)]
    _reserved_0_29: u32,

    /// Bit 30 — No message waiting to be read.
    pub empty: bool,

    /// Bit 31 — No space to post a message.
    pub full: bool,
}

/// A word posted to or read from the mailbox: a 4-bit channel plus the
/// upper 28 bits of a 16-byte aligned buffer address.
#[bitfield(u32)]
pub struct MailboxWord {
    /// Bits 0–3 — Channel selector.
    #[bits(4)]
    pub channel: u8,

    /// Bits 4–31 — Buffer address, shifted right by four.
    #[bits(28)]
    pub data: u32,
}

impl MailboxWord {
    /// Composes a message word from a 16-byte aligned address.
    #[inline]
    #[must_use]
    pub const fn compose(address: u32, channel: u8) -> Self {
        Self::new().with_data(address >> 4).with_channel(channel)
    }

    /// The buffer address carried by this word.
    #[inline]
    #[must_use]
    pub const fn address(&self) -> u32 {
        self.data() << 4
    }
}

/// IRQ pending register 2 (IRQs 32–63).
#[bitfield(u32)]
pub struct IrqPending2 {
    /// Bits 0–16 — IRQs 32–48.
    #[bits(17, default = 0)]
    _irq_32_48: u32,

    /// Bit 17 — IRQ 49, `gpio_int[0]` (bank 0 events).
    pub gpio_int0: bool,

    /// Bit 18 — IRQ 50, `gpio_int[1]` (bank 1 events).
    pub gpio_int1: bool,

    /// Bit 19 — IRQ 51, `gpio_int[2]`.
    pub gpio_int2: bool,

    /// Bit 20 — IRQ 52, `gpio_int[3]`, asserted for any GPIO event.
    pub gpio_int3: bool,

    /// Bits 21–31 — IRQs 53–63.
    #[bits(11, default = 0)]
    _irq_53_63: u16,
}

impl IrqPending2 {
    /// Bit position of the GPIO summary line (`gpio_int[3]`).
    pub const GPIO_SUMMARY_BIT: u32 = 20;
}

/// PL011 flag register (`uart::FR`).
#[bitfield(u32)]
pub struct UartFlags {
    pub cts: bool,
    pub dsr: bool,
    pub dcd: bool,
    pub busy: bool,
    /// Receive FIFO empty.
    pub rxfe: bool,
    /// Transmit FIFO full.
    pub txff: bool,
    pub rxff: bool,
    pub txfe: bool,
    pub ri: bool,

    #[bits(23, default = 0)]
    _reserved_9_31: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_word_keeps_channel_and_address() {
        let w = MailboxWord::compose(0x0008_5A10, 8);
        assert_eq!(w.into_bits(), 0x0008_5A18);
        assert_eq!(w.channel(), 8);
        assert_eq!(w.address(), 0x0008_5A10);
    }

    #[test]
    fn status_flags_map_to_top_bits() {
        assert!(MailboxStatus::from_bits(0x8000_0000).full());
        assert!(!MailboxStatus::from_bits(0x8000_0000).empty());
        assert!(MailboxStatus::from_bits(0x4000_0000).empty());
    }

    #[test]
    fn gpio_summary_is_bit_20() {
        let p = IrqPending2::new().with_gpio_int3(true);
        assert_eq!(p.into_bits(), 1 << IrqPending2::GPIO_SUMMARY_BIT);
    }

    #[test]
    fn uart_transmit_full_is_bit_5() {
        assert!(UartFlags::from_bits(1 << 5).txff());
        assert!(!UartFlags::from_bits(1 << 4).txff());
    }
}
