/// A packed `0x00RRGGBB` pixel, as a 32-bit BGR-ordered framebuffer stores
/// it.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self(0x0000_0000);
    pub const WHITE: Self = Self(0x00FF_FFFF);
    pub const RED: Self = Self(0x00FF_0000);
    pub const LIME: Self = Self(0x0000_FF00);
    pub const BLUE: Self = Self(0x0000_00FF);
    pub const AQUA: Self = Self(0x0000_FFFF);
    pub const FUCHSIA: Self = Self(0x00FF_00FF);
    pub const YELLOW: Self = Self(0x00FF_FF00);
    pub const GRAY: Self = Self(0x0080_8080);
    pub const MAROON: Self = Self(0x0080_0000);
    pub const OLIVE: Self = Self(0x0080_8000);
    pub const GREEN: Self = Self(0x0000_8000);
    pub const TEAL: Self = Self(0x0000_8080);
    pub const NAVY: Self = Self(0x0000_0080);
    pub const PURPLE: Self = Self(0x0080_0080);
    pub const SILVER: Self = Self(0x00C0_C0C0);

    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([0, r, g, b]))
    }

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl core::fmt::Debug for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Color(#{:06X})", self.0)
    }
}
