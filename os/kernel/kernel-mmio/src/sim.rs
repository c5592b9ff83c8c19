//! # Simulated Register File
//!
//! A host-side stand-in for the peripheral window, used by the tests of
//! every driver crate. Registers default to zero and hold whatever was last
//! written, except for the ones whose hardware semantics matter to drivers:
//!
//! | Register | Behavior on write |
//! |----------|-------------------|
//! | `GPSETn` | ORs the value into `GPLEVn` (output loop-back) |
//! | `GPCLRn` | clears the value's bits in `GPLEVn` |
//! | `GPEDSn` | write-1-to-clear |
//! | `ENABLE_IRQS_2` / `DISABLE_IRQS_2` | write-1-to-set / -clear of the enable mask |
//! | mailbox `WRITE` | stored, and echoed into mailbox `READ` |
//!
//! Reading the system timer's `CLO` returns the counter and advances it by
//! one tick, so busy-wait loops terminate.
//!
//! Every bus write is appended to a log that tests use to assert ordering.

extern crate alloc;

use crate::map::{gpio, irq, mailbox, timer};
use crate::{InterruptSafe, MmioAddress, RegisterBus};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cell::RefCell;

#[derive(Debug, Default)]
pub struct SimulatedBus {
    regs: RefCell<BTreeMap<usize, u32>>,
    writes: RefCell<Vec<(MmioAddress, u32)>>,
}

impl SimulatedBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register without side effects.
    #[must_use]
    pub fn peek(&self, addr: MmioAddress) -> u32 {
        self.regs
            .borrow()
            .get(&addr.as_usize())
            .copied()
            .unwrap_or_default()
    }

    /// Sets a register without side effects and without logging.
    pub fn poke(&self, addr: MmioAddress, value: u32) {
        self.regs.borrow_mut().insert(addr.as_usize(), value);
    }

    /// Drives an external level onto `pin`, as a button or sensor would.
    pub fn drive_level(&self, pin: u8, high: bool) {
        let (lev, _) = level_register(pin);
        let mask = 1 << (pin % 32);
        let value = self.peek(lev);
        self.poke(lev, if high { value | mask } else { value & !mask });
    }

    /// Simulates a rising edge on `pin`.
    ///
    /// The level goes high and, if rising-edge detection is enabled for the
    /// pin, its event status bit latches. Returns whether the event latched.
    pub fn raise_rising_edge(&self, pin: u8) -> bool {
        self.drive_level(pin, true);
        let (_, bank) = level_register(pin);
        let (ren, eds) = if bank == 0 {
            (gpio::GPREN0, gpio::GPEDS0)
        } else {
            (gpio::GPREN1, gpio::GPEDS1)
        };
        let mask = 1 << (pin % 32);
        if self.peek(ren) & mask == 0 {
            return false;
        }
        self.poke(eds, self.peek(eds) | mask);
        true
    }

    /// All writes issued through [`RegisterBus::write`], oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<(MmioAddress, u32)> {
        self.writes.borrow().clone()
    }

    /// Values written to `addr`, oldest first.
    #[must_use]
    pub fn writes_to(&self, addr: MmioAddress) -> Vec<u32> {
        self.writes
            .borrow()
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn clear_log(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl RegisterBus for SimulatedBus {
    fn read(&self, addr: MmioAddress) -> u32 {
        let value = self.peek(addr);
        if addr == timer::CLO {
            self.poke(addr, value.wrapping_add(1));
        }
        value
    }

    fn write(&self, addr: MmioAddress, value: u32) {
        self.writes.borrow_mut().push((addr, value));

        match addr {
            a if a == gpio::GPSET0 => self.poke(gpio::GPLEV0, self.peek(gpio::GPLEV0) | value),
            a if a == gpio::GPSET1 => self.poke(gpio::GPLEV1, self.peek(gpio::GPLEV1) | value),
            a if a == gpio::GPCLR0 => self.poke(gpio::GPLEV0, self.peek(gpio::GPLEV0) & !value),
            a if a == gpio::GPCLR1 => self.poke(gpio::GPLEV1, self.peek(gpio::GPLEV1) & !value),
            a if a == gpio::GPEDS0 || a == gpio::GPEDS1 => self.poke(a, self.peek(a) & !value),
            a if a == irq::ENABLE_IRQS_2 => self.poke(a, self.peek(a) | value),
            a if a == irq::DISABLE_IRQS_2 => {
                self.poke(irq::ENABLE_IRQS_2, self.peek(irq::ENABLE_IRQS_2) & !value);
            }
            a if a == mailbox::WRITE => {
                self.poke(a, value);
                self.poke(mailbox::READ, value);
            }
            a => self.poke(a, value),
        }
    }
}

// SAFETY: register accesses are plain map operations; nothing blocks.
unsafe impl InterruptSafe for SimulatedBus {}

fn level_register(pin: u8) -> (MmioAddress, u8) {
    if pin < 32 {
        (gpio::GPLEV0, 0)
    } else {
        (gpio::GPLEV1, 1)
    }
}
