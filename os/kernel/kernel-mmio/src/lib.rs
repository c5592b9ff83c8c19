//! # Memory-Mapped Peripheral Registers
//!
//! Typed access to the BCM2837 peripheral window: GPIO, the ARM interrupt
//! controller, the VideoCore mailbox, the system timer and the PL011 UART.
//!
//! ## Overview
//!
//! Every peripheral register is a 32-bit word at a fixed physical address.
//! Drivers never dereference those addresses themselves; they go through a
//! [`RegisterBus`], which performs exactly one bus transaction per call:
//!
//! ```text
//! driver code
//!     ↓
//! RegisterBus::read / RegisterBus::write
//!     ↓
//! VolatileBus  (target: read_volatile / write_volatile)
//! SimulatedBus (host tests: in-memory register file, `sim` feature)
//! ```
//!
//! The register addresses live in [`map`]; registers with interesting
//! bit layouts are modelled with [`bitfield_struct`] in [`regs`].
//!
//! ## Safety
//!
//! The bus performs no validation of addresses. Handing it an address that
//! is not a peripheral register is a programming error with undefined
//! behavior on real hardware; constructing a [`VolatileBus`] is therefore
//! `unsafe`.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod address;
pub mod barrier;
pub mod map;
pub mod regs;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use address::MmioAddress;

/// A 32-bit register bus.
///
/// Each call is a single, non-elided, non-reordered access.
pub trait RegisterBus {
    /// Reads the register at `addr`.
    fn read(&self, addr: MmioAddress) -> u32;

    /// Writes `value` to the register at `addr`.
    fn write(&self, addr: MmioAddress, value: u32);

    /// Read-modify-write of the register at `addr`.
    ///
    /// Not atomic with respect to interrupts; callers that share a register
    /// with an interrupt handler must mask interrupts themselves.
    #[inline]
    fn modify(&self, addr: MmioAddress, f: impl FnOnce(u32) -> u32) {
        let value = self.read(addr);
        self.write(addr, f(value));
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &B {
    #[inline]
    fn read(&self, addr: MmioAddress) -> u32 {
        (**self).read(addr)
    }

    #[inline]
    fn write(&self, addr: MmioAddress, value: u32) {
        (**self).write(addr, value);
    }
}

/// Marker for buses that may be used from interrupt context.
///
/// # Safety
/// Implementations must never block, spin on external state, or allocate in
/// [`RegisterBus::read`] and [`RegisterBus::write`].
pub unsafe trait InterruptSafe: RegisterBus {}

unsafe impl<B: InterruptSafe + ?Sized> InterruptSafe for &B {}

/// The hardware bus: volatile loads and stores to physical addresses.
///
/// Assumes an identity mapping of the peripheral window (MMU off, or mapped
/// 1:1 as device memory).
#[derive(Debug)]
pub struct VolatileBus {
    _private: (),
}

impl VolatileBus {
    /// Creates the hardware bus.
    ///
    /// # Safety
    /// The caller must run on the target SoC with the peripheral window
    /// accessible at [`map::PERIPHERAL_BASE`].
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for VolatileBus {
    #[inline(always)]
    #[allow(clippy::inline_always)]
    fn read(&self, addr: MmioAddress) -> u32 {
        // SAFETY: construction of `VolatileBus` asserts the window is mapped.
        unsafe { core::ptr::read_volatile(addr.as_ptr()) }
    }

    #[inline(always)]
    #[allow(clippy::inline_always)]
    fn write(&self, addr: MmioAddress, value: u32) {
        // SAFETY: construction of `VolatileBus` asserts the window is mapped.
        unsafe { core::ptr::write_volatile(addr.as_mut_ptr(), value) }
    }
}

unsafe impl InterruptSafe for VolatileBus {}

/// Returns `1 << bit` as a single-bit mask.
#[inline]
#[must_use]
pub const fn bit(bit: u32) -> u32 {
    1 << bit
}
