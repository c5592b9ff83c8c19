//! # GPIO Interrupt Dispatch
//!
//! Runs inside the IRQ handler. [`IrqContext::dispatch`] finds out which
//! routed GPIO pin raised a rising-edge event, acknowledges it and publishes
//! that pin's outcome into a [`SharedSignal`].
//!
//! ## Protocol
//!
//! ```text
//! IRQ_PENDING_2.gpio_int[3] ──no──▶ NotGpio
//!        │ yes
//!        ▼
//! snapshot GPEDS0/GPEDS1 (one read each)
//!        │
//!        ├─ exactly one routed pin ─▶ clear its bit, publish ─▶ Delivered
//!        ├─ several routed pins ────▶ clear their bits ───────▶ Suppressed
//!        └─ no routed pin ──────────▶ clear edge-enabled bits ▶ Unrecognized
//! ```
//!
//! Status bits are cleared by writing exactly those bits back
//! (write-1-to-clear), so events of other pins stay latched. Stray bits of
//! pins without rising-edge detection are left alone.
//!
//! ## Execution Context
//!
//! The context only accepts an [`InterruptSafe`] bus, owns no allocator
//! handle and never logs, so nothing it does can block. Construction happens
//! on the main loop, where route errors are reported.
//!
//! ```
//! use kernel_gpio::Pin;
//! use kernel_irq::{Dispatch, EdgeRoute, IrqContext};
//! use kernel_mmio::map::gpio;
//! use kernel_mmio::sim::SimulatedBus;
//! use kernel_sync::SharedSignal;
//!
//! let bus = SimulatedBus::new();
//! let signal = SharedSignal::new(1);
//! let routes = [EdgeRoute::new(Pin::new(23)?, -1)];
//! let mut ctx = IrqContext::new(&bus, &routes, &signal)?;
//!
//! bus.poke(kernel_mmio::map::irq::IRQ_PENDING_2, 1 << 20);
//! bus.poke(gpio::GPEDS0, 1 << 23);
//! assert!(matches!(ctx.dispatch(), Dispatch::Delivered { outcome: -1, .. }));
//! assert_eq!(signal.reader().get(), -1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

mod context;
mod events;

pub use context::{Dispatch, EdgeRoute, IrqContext};
pub use events::PendingEvents;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("pin {0} is routed more than once")]
    DuplicatePin(u8),
    #[error("the shared signal already has a writer")]
    WriterTaken,
}
