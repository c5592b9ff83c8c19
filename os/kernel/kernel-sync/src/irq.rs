use crate::SyncOnceCell;

/// IRQ mask bit (`I`) in `DAIF`.
const DAIF_I: u64 = 1 << 7;

/// Unmasks IRQ exceptions at the current exception level.
///
/// # Platform
///
/// `aarch64`.
///
/// # Safety & Privilege
///
/// Must run at EL1 or higher with a vector table installed; an IRQ taken
/// without one resets the core.
#[inline]
pub fn enable_irq() {
    unsafe { core::arch::asm!("msr daifclr, #2", options(nomem, nostack, preserves_flags)) }
}

/// Masks IRQ exceptions (`msr daifset, #2`).
///
/// # Platform
///
/// `aarch64`.
#[inline]
pub fn disable_irq() {
    unsafe { core::arch::asm!("msr daifset, #2", options(nomem, nostack, preserves_flags)) }
}

/// Returns the current `DAIF` value.
///
/// Bit 7 (`I`) set means IRQs are masked.
#[inline]
#[must_use]
pub fn daif() -> u64 {
    let r: u64;
    unsafe { core::arch::asm!("mrs {}, daif", out(reg) r, options(nomem, nostack, preserves_flags)) }
    r
}

/// Whether a `DAIF` value leaves IRQs unmasked.
#[inline]
#[must_use]
pub const fn irqs_unmasked(daif: u64) -> bool {
    daif & DAIF_I == 0
}

/// RAII guard that masks IRQs on creation and restores them on drop.
///
/// `IrqGuard::new()` snapshots the `I` bit. If IRQs were unmasked, it masks
/// them; on drop it unmasks **only** if they were unmasked before.
///
/// # Examples
///
/// ```no_run
/// use kernel_sync::irq::IrqGuard;
///
/// {
///     let _g = IrqGuard::new();
///     // read-modify-write of a register shared with the IRQ handler
/// }
/// ```
pub struct IrqGuard {
    were_enabled: bool,
}

impl Default for IrqGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl IrqGuard {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let enabled = irqs_unmasked(daif());
        if enabled {
            disable_irq();
        }
        Self {
            were_enabled: enabled,
        }
    }
}

impl Drop for IrqGuard {
    fn drop(&mut self) {
        if self.were_enabled {
            enable_irq();
        }
    }
}

impl<T> SyncOnceCell<T> {
    /// Initializes the cell with IRQs masked.
    ///
    /// Use this for cells the IRQ handler reads, so the handler never spins
    /// on a half-finished initialization of the core it interrupted.
    pub fn get_or_init_irq_safe(&self, init: impl FnOnce() -> T) -> &T {
        let _g = IrqGuard::new();
        self.get_or_init(init)
    }
}
