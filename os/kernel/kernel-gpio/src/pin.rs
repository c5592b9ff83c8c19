use crate::GpioError;
use kernel_mmio::MmioAddress;
use kernel_mmio::map::gpio;

/// Highest GPIO pin number on the BCM2837.
const MAX_PIN: u8 = 53;

/// A validated GPIO pin number (0–53).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Validates a raw pin number.
    ///
    /// # Errors
    /// * [`GpioError::UnreachableBank`] if `pin / 10` names no function
    ///   select register.
    /// * [`GpioError::InvalidPin`] for the unused fields of `GPFSEL5`
    ///   (pins 54–59).
    pub const fn new(pin: u8) -> Result<Self, GpioError> {
        let selector = pin / 10;
        if selector >= gpio::GPFSEL_COUNT {
            return Err(GpioError::UnreachableBank { pin, selector });
        }
        if pin > MAX_PIN {
            return Err(GpioError::InvalidPin(pin));
        }
        Ok(Self(pin))
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Index of the `GPFSELn` register holding this pin's function field.
    #[must_use]
    pub const fn selector(self) -> u8 {
        self.0 / 10
    }

    /// Bit offset of the pin's 3-bit function field.
    #[must_use]
    pub const fn field_shift(self) -> u32 {
        (self.0 % 10) as u32 * 3
    }

    #[must_use]
    pub const fn bank(self) -> Bank {
        if self.0 < 32 { Bank::Bank0 } else { Bank::Bank1 }
    }

    /// The pin's bit within its bank's registers.
    #[must_use]
    pub const fn mask(self) -> u32 {
        1 << (self.0 % 32)
    }
}

impl TryFrom<u8> for Pin {
    type Error = GpioError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Pins 0–31 and 32–53 are served by separate set/clear/level/event
/// registers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bank {
    Bank0,
    Bank1,
}

impl Bank {
    pub const ALL: [Self; 2] = [Self::Bank0, Self::Bank1];

    /// Number of the pin in bit 0 of this bank's registers.
    #[must_use]
    pub const fn first_pin(self) -> u8 {
        match self {
            Self::Bank0 => 0,
            Self::Bank1 => 32,
        }
    }

    #[must_use]
    pub const fn output_set(self) -> MmioAddress {
        match self {
            Self::Bank0 => gpio::GPSET0,
            Self::Bank1 => gpio::GPSET1,
        }
    }

    #[must_use]
    pub const fn output_clear(self) -> MmioAddress {
        match self {
            Self::Bank0 => gpio::GPCLR0,
            Self::Bank1 => gpio::GPCLR1,
        }
    }

    #[must_use]
    pub const fn level(self) -> MmioAddress {
        match self {
            Self::Bank0 => gpio::GPLEV0,
            Self::Bank1 => gpio::GPLEV1,
        }
    }

    #[must_use]
    pub const fn event_status(self) -> MmioAddress {
        match self {
            Self::Bank0 => gpio::GPEDS0,
            Self::Bank1 => gpio::GPEDS1,
        }
    }

    #[must_use]
    pub const fn rising_edge_enable(self) -> MmioAddress {
        match self {
            Self::Bank0 => gpio::GPREN0,
            Self::Bank1 => gpio::GPREN1,
        }
    }

    #[must_use]
    pub const fn pull_clock(self) -> MmioAddress {
        match self {
            Self::Bank0 => gpio::GPPUDCLK0,
            Self::Bank1 => gpio::GPPUDCLK1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Function select encoding.
    #[must_use]
    pub const fn function_bits(self) -> u32 {
        match self {
            Self::Input => 0b000,
            Self::Output => 0b001,
        }
    }
}

/// Pull resistor state, as written to `GPPUD`.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Pull {
    #[default]
    None = 0,
    Down = 1,
    Up = 2,
}

/// How a pin is set up. Built once per pin.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PinConfig {
    pin: Pin,
    direction: Direction,
    pull: Pull,
    rising_edge: bool,
}

impl PinConfig {
    #[must_use]
    pub const fn input(pin: Pin) -> Self {
        Self {
            pin,
            direction: Direction::Input,
            pull: Pull::None,
            rising_edge: false,
        }
    }

    #[must_use]
    pub const fn output(pin: Pin) -> Self {
        Self {
            pin,
            direction: Direction::Output,
            pull: Pull::None,
            rising_edge: false,
        }
    }

    #[must_use]
    pub const fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    /// Requests a rising-edge interrupt for the pin.
    ///
    /// # Errors
    /// [`GpioError::EdgeOnOutput`] for output pins.
    pub const fn with_rising_edge(mut self) -> Result<Self, GpioError> {
        if matches!(self.direction, Direction::Output) {
            return Err(GpioError::EdgeOnOutput(self.pin.number()));
        }
        self.rising_edge = true;
        Ok(self)
    }

    #[must_use]
    pub const fn pin(&self) -> Pin {
        self.pin
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn pull(&self) -> Pull {
        self.pull
    }

    #[must_use]
    pub const fn rising_edge(&self) -> bool {
        self.rising_edge
    }
}
