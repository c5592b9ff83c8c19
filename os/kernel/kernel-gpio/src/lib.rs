//! # GPIO Pin Controller
//!
//! Configures BCM2837 GPIO pins and drives or samples their levels.
//!
//! ## Configuration Sequence
//!
//! [`GpioController::configure`] performs the steps the peripheral requires,
//! in this order, and touches no register before the request is validated:
//!
//! 1. **Function select**: clear the pin's 3-bit field in `GPFSELn` and
//!    write the input (`000`) or output (`001`) encoding. Other fields in
//!    the register are preserved.
//! 2. **Pull control**: write the pull mode to `GPPUD`, wait, clock it into
//!    the pin through `GPPUDCLKn`, wait, then remove the control signal and
//!    the clock.
//! 3. **Edge detection** (inputs only): OR the pin's bit into `GPRENn` and
//!    enable the GPIO summary line in the ARM interrupt controller.
//!
//! Output level changes go through the write-1-to-act `GPSETn`/`GPCLRn`
//! registers, so no read-modify-write is needed and no other pin changes.
//!
//! ```
//! use kernel_gpio::{Direction, GpioController, Pin, SpinDelay};
//! use kernel_mmio::sim::SimulatedBus;
//!
//! let bus = SimulatedBus::new();
//! let mut gpio = GpioController::new(&bus, SpinDelay::pull_settle());
//!
//! gpio.configure_pin(4, Direction::Output, false)?;
//! let led = Pin::new(4)?;
//! gpio.set_pin(led);
//! assert!(gpio.read_pin(led));
//! # Ok::<(), kernel_gpio::GpioError>(())
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

mod controller;
mod delay;
mod pin;
pub mod snes;

pub use controller::GpioController;
pub use delay::{MicroDelay, SettleDelay, SpinDelay, SystemTimer};
pub use pin::{Bank, Direction, Pin, PinConfig, Pull};

/// Configuration errors. Hardware state is untouched when one is returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum GpioError {
    #[error("invalid pin number {0}")]
    InvalidPin(u8),
    #[error("pin {pin} has no function select register (selector {selector})")]
    UnreachableBank { pin: u8, selector: u8 },
    #[error("pin {0} is an output and cannot detect edges")]
    EdgeOnOutput(u8),
    #[error("pin {0} is already configured")]
    AlreadyConfigured(u8),
}
