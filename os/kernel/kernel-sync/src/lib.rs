//! # Synchronization between the main loop and the IRQ handler
//!
//! The system has one core and two priority levels: the main loop and the
//! IRQ handler, which can preempt the main loop at any instruction. This
//! crate provides the handful of primitives that are safe to share across
//! that boundary without locks:
//!
//! * [`SharedSignal`]: a single-writer word the handler publishes into.
//! * [`SyncOnceCell`]: write-once storage for state set up before IRQs are
//!   unmasked, such as the logger.
//! * [`HandlerCell`]: install-once storage the handler borrows mutably,
//!   used for its dispatch context.
//! * [`irq`] (AArch64 only): masking and unmasking IRQs.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(target_arch = "aarch64")]
pub mod irq;
mod handler_cell;
mod shared_signal;
mod sync_once_cell;

pub use handler_cell::HandlerCell;
pub use shared_signal::{SharedSignal, SignalReader, SignalWriter};
pub use sync_once_cell::SyncOnceCell;
