//! # Memory Layout Constants

/// Start of the BCM2837 peripheral window as seen from the ARM cores.
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;

/// Mask that turns a VideoCore bus address into an ARM physical address.
///
/// The VideoCore encodes its cache alias in bits 30–31.
pub const BUS_ADDRESS_MASK: u32 = 0x3FFF_FFFF;

/// Converts a VideoCore bus address into an ARM physical address.
#[inline]
#[must_use]
pub const fn bus_to_physical(bus_address: u32) -> u32 {
    bus_address & BUS_ADDRESS_MASK
}
