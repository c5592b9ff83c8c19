use core::fmt;
use kernel_gpio::{Bank, Pin};
use kernel_mmio::{MmioAddress, RegisterBus};

/// A set of GPIO pins, one bit per pin number.
///
/// Used both for the event status snapshot taken at dispatch entry and for
/// the subsets dispatch acts on.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct PendingEvents(u64);

impl PendingEvents {
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn contains(self, pin: Pin) -> bool {
        self.0 & (1 << pin.number()) != 0
    }

    #[must_use]
    pub const fn with(self, pin: Pin) -> Self {
        Self(self.0 | (1 << pin.number()))
    }

    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// The 32-bit register image of `bank`.
    #[must_use]
    pub const fn bank(self, bank: Bank) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let word = (self.0 >> bank.first_pin()) as u32;
        word
    }

    fn with_bank(self, bank: Bank, word: u32) -> Self {
        Self(self.0 | (u64::from(word) << bank.first_pin()))
    }

    /// Reads one register per bank and merges them.
    pub(crate) fn read(bus: &impl RegisterBus, register: impl Fn(Bank) -> MmioAddress) -> Self {
        Bank::ALL.into_iter().fold(Self::NONE, |acc, bank| {
            acc.with_bank(bank, bus.read(register(bank)))
        })
    }
}

impl fmt::Debug for PendingEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        let mut rest = self.0;
        while rest != 0 {
            set.entry(&rest.trailing_zeros());
            rest &= rest - 1;
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(n: u8) -> Pin {
        Pin::new(n).unwrap()
    }

    #[test]
    fn bank_images_split_at_pin_32() {
        let e = PendingEvents::NONE.with(pin(3)).with(pin(32)).with(pin(53));
        assert_eq!(e.bank(Bank::Bank0), 1 << 3);
        assert_eq!(e.bank(Bank::Bank1), (1 << 0) | (1 << 21));
        assert_eq!(e.len(), 3);
    }

    #[test]
    fn set_operations() {
        let a = PendingEvents::from_bits(0b1100);
        let b = PendingEvents::from_bits(0b0110);
        assert_eq!(a.intersect(b).bits(), 0b0100);
        assert_eq!(a.without(b).bits(), 0b1000);
        assert_eq!(a.union(b).bits(), 0b1110);
        assert!(PendingEvents::NONE.is_empty());
    }

    #[test]
    fn debug_lists_pin_numbers() {
        let e = PendingEvents::from_bits((1 << 22) | (1 << 23));
        assert_eq!(format!("{e:?}"), "{22, 23}");
    }
}
