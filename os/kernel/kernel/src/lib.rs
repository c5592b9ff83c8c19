//! # Board Support
//!
//! Wires the driver crates into the system that runs on the board:
//!
//! * three LEDs on GPIO 4, 17 and 27, lit one at a time by [`LedChaser`],
//! * two push buttons on GPIO 22 and 23 whose rising edges interrupt the
//!   core and set the chaser's direction and speed through a
//!   [`SharedSignal`](kernel_sync::SharedSignal),
//! * a 1024×768 32-bit framebuffer negotiated with the VideoCore.
//!
//! [`Board::bring_up`] performs the configuration against any register bus
//! and mailbox channel, so it runs unchanged under test. The `runtime`
//! module, built only for the bare-metal target, owns the statics the IRQ
//! handler reaches and exports the `irq_handler` symbol.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod board;
mod chaser;
pub mod config;
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
pub mod runtime;

pub use board::Board;
pub use chaser::LedChaser;
pub use config::BoardConfig;

use kernel_fb::SurfaceError;
use kernel_gpio::GpioError;
use kernel_irq::RouteError;
use kernel_mailbox::NegotiationError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BringUpError {
    #[error("GPIO setup failed: {0}")]
    Gpio(#[from] GpioError),
    #[error("framebuffer setup failed: {0}")]
    Negotiation(#[from] NegotiationError),
    #[error("button routing failed: {0}")]
    Route(#[from] RouteError),
    #[error("framebuffer cannot be drawn to: {0}")]
    Surface(#[from] SurfaceError),
    #[error("the IRQ handler is already armed")]
    AlreadyArmed,
}
