//! # Memory Barriers
//!
//! On AArch64 these emit `dmb`/`dsb`; elsewhere they degrade to compiler
//! fences so host builds keep the same ordering constraints for the
//! optimizer.

#[cfg(target_arch = "aarch64")]
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn dmb() {
    unsafe { core::arch::asm!("dmb sy", options(nostack, preserves_flags)) }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn dsb() {
    unsafe { core::arch::asm!("dsb sy", options(nostack, preserves_flags)) }
}

#[cfg(not(target_arch = "aarch64"))]
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn dmb() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
}

#[cfg(not(target_arch = "aarch64"))]
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn dsb() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
}
