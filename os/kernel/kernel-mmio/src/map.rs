//! # BCM2837 Register Map
//!
//! Physical addresses of the registers this workspace touches. Offsets
//! follow the BCM2835/2837 ARM Peripherals manual; the peripheral window
//! starts at [`PERIPHERAL_BASE`] on the Pi 3 and Pi Zero 2 W.

use crate::MmioAddress;

pub use kernel_info::memory::PERIPHERAL_BASE;

const BASE: MmioAddress = MmioAddress::new(PERIPHERAL_BASE);

/// GPIO register block.
pub mod gpio {
    use super::{BASE, MmioAddress};

    pub const BASE_ADDR: MmioAddress = BASE.offset(0x0020_0000);

    /// Function select 0 (pins 0–9). Registers 1–5 follow at 4-byte strides.
    pub const GPFSEL0: MmioAddress = BASE_ADDR.offset(0x00);
    /// Number of function select registers (pins 0–53, ten per register).
    pub const GPFSEL_COUNT: u8 = 6;

    pub const GPSET0: MmioAddress = BASE_ADDR.offset(0x1C);
    pub const GPSET1: MmioAddress = BASE_ADDR.offset(0x20);
    pub const GPCLR0: MmioAddress = BASE_ADDR.offset(0x28);
    pub const GPCLR1: MmioAddress = BASE_ADDR.offset(0x2C);
    pub const GPLEV0: MmioAddress = BASE_ADDR.offset(0x34);
    pub const GPLEV1: MmioAddress = BASE_ADDR.offset(0x38);
    /// Event detect status, write-1-to-clear.
    pub const GPEDS0: MmioAddress = BASE_ADDR.offset(0x40);
    pub const GPEDS1: MmioAddress = BASE_ADDR.offset(0x44);
    /// Rising edge detect enable.
    pub const GPREN0: MmioAddress = BASE_ADDR.offset(0x4C);
    pub const GPREN1: MmioAddress = BASE_ADDR.offset(0x50);
    /// Pull-up/down control.
    pub const GPPUD: MmioAddress = BASE_ADDR.offset(0x94);
    pub const GPPUDCLK0: MmioAddress = BASE_ADDR.offset(0x98);
    pub const GPPUDCLK1: MmioAddress = BASE_ADDR.offset(0x9C);

    /// Function select register for selector index `index` (0–5).
    #[inline]
    #[must_use]
    pub const fn gpfsel(index: u8) -> MmioAddress {
        GPFSEL0.offset(index as usize * 4)
    }
}

/// ARM interrupt controller.
pub mod irq {
    use super::{BASE, MmioAddress};

    pub const BASE_ADDR: MmioAddress = BASE.offset(0x0000_B200);

    pub const IRQ_BASIC_PENDING: MmioAddress = BASE_ADDR.offset(0x00);
    pub const IRQ_PENDING_1: MmioAddress = BASE_ADDR.offset(0x04);
    pub const IRQ_PENDING_2: MmioAddress = BASE_ADDR.offset(0x08);
    /// Write-1-to-set enables for IRQs 32–63.
    pub const ENABLE_IRQS_2: MmioAddress = BASE_ADDR.offset(0x14);
    /// Write-1-to-clear enables for IRQs 32–63.
    pub const DISABLE_IRQS_2: MmioAddress = BASE_ADDR.offset(0x20);
}

/// VideoCore mailbox 0 (VC → ARM) and mailbox 1 (ARM → VC).
pub mod mailbox {
    use super::{BASE, MmioAddress};

    pub const BASE_ADDR: MmioAddress = BASE.offset(0x0000_B880);

    pub const READ: MmioAddress = BASE_ADDR.offset(0x00);
    pub const STATUS: MmioAddress = BASE_ADDR.offset(0x18);
    pub const WRITE: MmioAddress = BASE_ADDR.offset(0x20);
}

/// 1 MHz free-running system timer.
pub mod timer {
    use super::{BASE, MmioAddress};

    pub const BASE_ADDR: MmioAddress = BASE.offset(0x0000_3000);

    /// Counter, lower 32 bits.
    pub const CLO: MmioAddress = BASE_ADDR.offset(0x04);
}

/// PL011 UART0.
pub mod uart {
    use super::{BASE, MmioAddress};

    pub const BASE_ADDR: MmioAddress = BASE.offset(0x0020_1000);

    pub const DR: MmioAddress = BASE_ADDR.offset(0x00);
    pub const FR: MmioAddress = BASE_ADDR.offset(0x18);
}
