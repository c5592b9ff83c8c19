use crate::{MailboxBuffer, MailboxError};
use core::hint::spin_loop;
use kernel_mmio::map::mailbox;
use kernel_mmio::regs::{MailboxStatus, MailboxWord};
use kernel_mmio::{RegisterBus, barrier};

/// Property tags, ARM to VideoCore.
pub const PROPERTY_CHANNEL: u8 = 8;

/// A request/response transport to the VideoCore.
pub trait MailboxChannel {
    /// Hands `buffer` to the firmware and blocks until it has answered in
    /// place. There is no timeout.
    ///
    /// # Errors
    /// Transport failures only; the response code is checked by the caller.
    fn exchange(&mut self, buffer: &mut MailboxBuffer) -> Result<(), MailboxError>;
}

impl<C: MailboxChannel + ?Sized> MailboxChannel for &mut C {
    fn exchange(&mut self, buffer: &mut MailboxBuffer) -> Result<(), MailboxError> {
        (**self).exchange(buffer)
    }
}

/// The hardware mailbox pair.
#[derive(Debug)]
pub struct Mailbox<B> {
    bus: B,
    channel: u8,
}

impl<B: RegisterBus> Mailbox<B> {
    /// A mailbox on the property channel.
    #[must_use]
    pub const fn new(bus: B) -> Self {
        Self::with_channel(bus, PROPERTY_CHANNEL)
    }

    #[must_use]
    pub const fn with_channel(bus: B, channel: u8) -> Self {
        Self {
            bus,
            channel: channel & 0xF,
        }
    }

    fn status(&self) -> MailboxStatus {
        MailboxStatus::from_bits(self.bus.read(mailbox::STATUS))
    }

    /// Waits for room in the write mailbox, then posts `word`.
    fn post(&self, word: MailboxWord) {
        while self.status().full() {
            spin_loop();
        }
        self.bus.write(mailbox::WRITE, word.into_bits());
    }

    /// Reads the read mailbox until `expected` comes back.
    ///
    /// Words for other channels are dropped silently. Replies on our channel
    /// that carry another buffer address are stale and dropped with a
    /// warning.
    fn wait_for(&self, expected: MailboxWord) {
        loop {
            while self.status().empty() {
                spin_loop();
            }
            let word = MailboxWord::from_bits(self.bus.read(mailbox::READ));
            if word.into_bits() == expected.into_bits() {
                return;
            }
            if word.channel() == expected.channel() {
                log::warn!(
                    "dropping mailbox reply for {:#010x}, expected {:#010x}",
                    word.address(),
                    expected.address()
                );
            }
        }
    }
}

impl<B: RegisterBus> MailboxChannel for Mailbox<B> {
    fn exchange(&mut self, buffer: &mut MailboxBuffer) -> Result<(), MailboxError> {
        // The firmware writes the buffer behind the compiler's back.
        let address = u32::try_from(buffer.as_ptr().expose_provenance())
            .map_err(|_| MailboxError::Unaddressable)?;

        let word = MailboxWord::compose(address, self.channel);
        barrier::dsb();
        self.post(word);
        self.wait_for(word);
        barrier::dmb();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_mmio::MmioAddress;
    use kernel_mmio::sim::SimulatedBus;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    #[test]
    fn post_then_wait_round_trips_through_the_registers() {
        let bus = SimulatedBus::new();
        let mbox = Mailbox::new(&bus);

        let word = MailboxWord::compose(0x0008_0040, PROPERTY_CHANNEL);
        mbox.post(word);
        assert_eq!(bus.writes_to(mailbox::WRITE), [0x0008_0048]);

        mbox.wait_for(word);
        assert_eq!(bus.peek(mailbox::READ), 0x0008_0048);
    }

    /// Mailbox registers whose read side replays a fixed sequence.
    struct Replies {
        queue: RefCell<VecDeque<u32>>,
        reads: Cell<usize>,
    }

    impl RegisterBus for Replies {
        fn read(&self, addr: MmioAddress) -> u32 {
            if addr == mailbox::READ {
                self.reads.set(self.reads.get() + 1);
                return self.queue.borrow_mut().pop_front().unwrap_or_default();
            }
            if addr == mailbox::STATUS && self.queue.borrow().is_empty() {
                return MailboxStatus::new().with_empty(true).into_bits();
            }
            0
        }

        fn write(&self, _addr: MmioAddress, _value: u32) {}
    }

    #[test]
    fn wait_skips_stale_and_foreign_replies() {
        let expected = MailboxWord::compose(0x0008_0040, PROPERTY_CHANNEL);
        let bus = Replies {
            queue: RefCell::new(VecDeque::from([
                // another channel
                MailboxWord::compose(0x0008_0040, 1).into_bits(),
                // our channel, someone else's buffer
                MailboxWord::compose(0x0009_0000, PROPERTY_CHANNEL).into_bits(),
                expected.into_bits(),
                // must not be consumed
                MailboxWord::compose(0x000A_0000, PROPERTY_CHANNEL).into_bits(),
            ])),
            reads: Cell::new(0),
        };

        Mailbox::new(&bus).wait_for(expected);
        assert_eq!(bus.reads.get(), 3);
        assert_eq!(bus.queue.borrow().len(), 1);
    }

    #[test]
    fn channel_is_four_bits() {
        let bus = SimulatedBus::new();
        let mbox = Mailbox::with_channel(&bus, 0x1F);
        assert_eq!(mbox.channel, 0xF);
    }

    #[test]
    fn exchange_posts_the_buffer_address_or_refuses_it() {
        let bus = SimulatedBus::new();
        let mut mbox = Mailbox::new(&bus);
        let mut buffer = MailboxBuffer::new();
        let addr = buffer.as_ptr().expose_provenance();

        match mbox.exchange(&mut buffer) {
            Ok(()) => {
                let expected = u32::try_from(addr).unwrap() | 8;
                assert_eq!(bus.writes_to(mailbox::WRITE), [expected]);
            }
            Err(e) => {
                assert_eq!(e, MailboxError::Unaddressable);
                assert!(addr > u32::MAX as usize);
                assert!(bus.writes().is_empty());
            }
        }
    }
}
