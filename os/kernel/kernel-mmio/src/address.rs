use core::fmt;

/// Physical address of a 32-bit peripheral register.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MmioAddress(usize);

impl MmioAddress {
    #[inline]
    #[must_use]
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Address of the register `bytes` past this one.
    #[inline]
    #[must_use]
    pub const fn offset(self, bytes: usize) -> Self {
        Self(self.0 + bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_ptr(self) -> *const u32 {
        self.0 as *const u32
    }

    #[inline]
    #[must_use]
    pub const fn as_mut_ptr(self) -> *mut u32 {
        self.0 as *mut u32
    }
}

impl fmt::Debug for MmioAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MmioAddress({:#010x})", self.0)
    }
}

impl fmt::LowerHex for MmioAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
