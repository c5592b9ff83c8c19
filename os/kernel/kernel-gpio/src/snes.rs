//! # SNES Controller
//!
//! Samples a SNES gamepad wired to three GPIO pins. The pad holds a 16-bit
//! shift register: a pulse on LATCH captures the buttons, then each falling
//! edge on CLOCK presents the next bit on DATA, active low.
//!
//! ```text
//! LATCH  ‾‾|‾‾‾‾‾‾|________________________________
//!          ←12 µs→
//! CLOCK  ‾‾‾‾‾‾‾‾‾‾‾‾|___|‾‾‾|___|‾‾‾ … (16 pulses, 6 µs half periods)
//! DATA   ════════════╳ b0 ═══╳ b1 ═══ …   sampled after each falling edge
//! ```

use crate::{GpioController, GpioError, MicroDelay, Pin, PinConfig, SettleDelay};
use kernel_mmio::RegisterBus;

const LATCH_PULSE_US: u32 = 12;
const HALF_CYCLE_US: u32 = 6;
const BITS: u32 = 16;

/// Buttons in the order the pad shifts them out.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Button {
    B = 0,
    Y = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
    A = 8,
    X = 9,
    L = 10,
    R = 11,
}

/// One sample of the pad. A set bit is a pressed button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ButtonState(pub u16);

impl ButtonState {
    #[must_use]
    pub const fn is_pressed(self, button: Button) -> bool {
        self.0 & (1 << button as u16) != 0
    }
}

/// Wiring of the pad.
#[derive(Debug, Copy, Clone)]
pub struct SnesPins {
    pub latch: Pin,
    pub clock: Pin,
    pub data: Pin,
}

impl SnesPins {
    /// LATCH on 9, DATA on 10, CLOCK on 11.
    ///
    /// # Errors
    /// Never fails for these pin numbers; the `Result` comes from pin
    /// validation.
    pub const fn standard() -> Result<Self, GpioError> {
        let Ok(latch) = Pin::new(9) else {
            return Err(GpioError::InvalidPin(9));
        };
        let Ok(data) = Pin::new(10) else {
            return Err(GpioError::InvalidPin(10));
        };
        let Ok(clock) = Pin::new(11) else {
            return Err(GpioError::InvalidPin(11));
        };
        Ok(Self { latch, clock, data })
    }
}

pub struct SnesController<'g, B, D, T> {
    gpio: &'g GpioController<B, D>,
    timer: T,
    pins: SnesPins,
}

impl<'g, B: RegisterBus, D: SettleDelay, T: MicroDelay> SnesController<'g, B, D, T> {
    /// Configures the three pins and idles the bus (CLOCK high, LATCH low).
    ///
    /// # Errors
    /// Propagates configuration errors, e.g. a pin that is already in use.
    pub fn attach(
        gpio: &'g mut GpioController<B, D>,
        timer: T,
        pins: SnesPins,
    ) -> Result<Self, GpioError> {
        gpio.configure(PinConfig::output(pins.latch))?;
        gpio.configure(PinConfig::output(pins.clock))?;
        gpio.configure(PinConfig::input(pins.data))?;

        let gpio = &*gpio;
        gpio.clear_pin(pins.latch);
        gpio.set_pin(pins.clock);

        Ok(Self { gpio, timer, pins })
    }

    /// Latches and shifts in all sixteen bits.
    #[must_use]
    pub fn sample(&self) -> ButtonState {
        let gpio = self.gpio;

        gpio.set_pin(self.pins.latch);
        self.timer.delay_us(LATCH_PULSE_US);
        gpio.clear_pin(self.pins.latch);

        let mut state = 0u16;
        for i in 0..BITS {
            self.timer.delay_us(HALF_CYCLE_US);
            gpio.clear_pin(self.pins.clock);

            if !gpio.read_pin(self.pins.data) {
                state |= 1 << i;
            }

            self.timer.delay_us(HALF_CYCLE_US);
            gpio.set_pin(self.pins.clock);
        }

        ButtonState(state)
    }
}
