//! # Board Configuration and Shared Data Model
//!
//! This crate holds the pieces of state that more than one driver needs to
//! agree on: where the peripheral window lives, how a VideoCore bus address
//! maps back to an ARM physical address, and what a negotiated framebuffer
//! looks like.
//!
//! ## Overview
//!
//! The framebuffer is produced by the mailbox negotiator and consumed by the
//! pixel surface. Neither side should be able to observe a half-valid
//! framebuffer, so the descriptor is only constructible through a validating
//! constructor and is immutable afterwards:
//!
//! ```text
//! kernel-mailbox ──negotiate──▶ FramebufferDescriptor ──view──▶ kernel-fb
//!                               (validated, immutable)
//! ```
//!
//! ## Memory Layout
//!
//! ```text
//! Physical Address Space (BCM2837):
//!
//! 0x0000_0000 ┌─────────────────────────────────┐
//!             │   ARM RAM (kernel image at      │
//!             │   0x8_0000, framebuffer in the  │
//!             │   GPU split at the top)         │
//! PERIPHERAL_ ├─────────────────────────────────┤ 0x3F00_0000
//! BASE        │   Peripheral window (GPIO, IRQ, │
//!             │   mailbox, timer, UART)         │
//! 0x4000_0000 └─────────────────────────────────┘
//! ```
//!
//! The VideoCore reports buffer addresses in its own bus address space, where
//! the two top bits select a cache alias. [`memory::BUS_ADDRESS_MASK`]
//! strips them.
//!
//! ## Usage
//!
//! ```rust
//! use kernel_info::display::{FramebufferDescriptor, PixelOrder};
//!
//! let fb = FramebufferDescriptor::new(0x3C10_0000, 1024, 768, 4096, 32, PixelOrder::Bgr, 3_145_728)
//!     .expect("valid descriptor");
//! assert_eq!(fb.bytes_per_pixel(), 4);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod memory;
