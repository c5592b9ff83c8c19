//! # Framebuffer Descriptor

use core::fmt;
use core::num::NonZeroU32;

/// Byte order of the color channels within a packed pixel.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelOrder {
    /// Blue in the lowest byte; `0x00RRGGBB` color codes render as written.
    Bgr = 0,
    /// Red in the lowest byte.
    Rgb = 1,
}

impl PixelOrder {
    /// Decodes the value the VideoCore reports for the pixel order tag.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Bgr),
            1 => Some(Self::Rgb),
            _ => None,
        }
    }
}

/// Reasons a framebuffer description is unusable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("framebuffer address is null")]
    NullAddress,
    #[error("framebuffer has a zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("unsupported pixel depth of {0} bits")]
    UnsupportedDepth(u32),
    #[error("unknown pixel order {0}")]
    UnknownPixelOrder(u32),
    #[error("pitch of {pitch} bytes is smaller than a row of {row} bytes")]
    PitchTooSmall { pitch: u32, row: u64 },
    #[error("buffer of {size} bytes cannot hold {required} bytes of pixels")]
    SizeTooSmall { size: u32, required: u64 },
}

/// A negotiated, validated framebuffer.
///
/// Invariants, checked by [`FramebufferDescriptor::new`]:
/// * the base address is non-zero,
/// * `pitch >= width * depth / 8`,
/// * `size` reaches the last pixel of the last row:
///   `size >= pitch * (height - 1) + width * depth / 8`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct FramebufferDescriptor {
    base: NonZeroU32,
    width: u32,
    height: u32,
    pitch: u32,
    depth: u32,
    pixel_order: PixelOrder,
    size: u32,
}

impl FramebufferDescriptor {
    /// Validates and builds a descriptor.
    ///
    /// `base` is an ARM physical address, i.e. already masked with
    /// [`BUS_ADDRESS_MASK`](crate::memory::BUS_ADDRESS_MASK).
    ///
    /// # Errors
    /// Returns a [`DescriptorError`] naming the first violated invariant.
    pub fn new(
        base: u32,
        width: u32,
        height: u32,
        pitch: u32,
        depth: u32,
        pixel_order: PixelOrder,
        size: u32,
    ) -> Result<Self, DescriptorError> {
        let base = NonZeroU32::new(base).ok_or(DescriptorError::NullAddress)?;
        if width == 0 || height == 0 {
            return Err(DescriptorError::ZeroDimension { width, height });
        }
        if depth == 0 || depth % 8 != 0 || depth > 32 {
            return Err(DescriptorError::UnsupportedDepth(depth));
        }

        let bytes_per_pixel = u64::from(depth / 8);
        let row = u64::from(width) * bytes_per_pixel;
        if u64::from(pitch) < row {
            return Err(DescriptorError::PitchTooSmall { pitch, row });
        }

        let required = u64::from(pitch) * u64::from(height - 1) + row;
        if u64::from(size) < required {
            return Err(DescriptorError::SizeTooSmall { size, required });
        }

        Ok(Self {
            base,
            width,
            height,
            pitch,
            depth,
            pixel_order,
            size,
        })
    }

    /// ARM physical address of the first pixel.
    #[must_use]
    pub const fn base(&self) -> NonZeroU32 {
        self.base
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including padding.
    #[must_use]
    pub const fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Bits per pixel.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub const fn bytes_per_pixel(&self) -> u32 {
        self.depth / 8
    }

    #[must_use]
    pub const fn pixel_order(&self) -> PixelOrder {
        self.pixel_order
    }

    /// Total buffer size in bytes.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }
}

impl fmt::Debug for FramebufferDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramebufferDescriptor")
            .field("base", &format_args!("{:#010x}", self.base.get()))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pitch", &self.pitch)
            .field("depth", &self.depth)
            .field("pixel_order", &self.pixel_order)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE_1024_768: u32 = 1024 * 768 * 4;

    #[test]
    fn accepts_a_tightly_packed_buffer() {
        let fb = FramebufferDescriptor::new(
            0x3C10_0000,
            1024,
            768,
            4096,
            32,
            PixelOrder::Bgr,
            SIZE_1024_768,
        )
        .unwrap();
        assert_eq!(fb.base().get(), 0x3C10_0000);
        assert_eq!(fb.bytes_per_pixel(), 4);
        assert_eq!(fb.size(), SIZE_1024_768);
    }

    #[test]
    fn rejects_null_address() {
        let err = FramebufferDescriptor::new(0, 1024, 768, 4096, 32, PixelOrder::Bgr, SIZE_1024_768);
        assert_eq!(err, Err(DescriptorError::NullAddress));
    }

    #[test]
    fn rejects_undersized_buffer() {
        let err = FramebufferDescriptor::new(
            0x3C10_0000,
            1024,
            768,
            4096,
            32,
            PixelOrder::Bgr,
            SIZE_1024_768 - 1,
        );
        assert_eq!(
            err,
            Err(DescriptorError::SizeTooSmall {
                size: SIZE_1024_768 - 1,
                required: u64::from(SIZE_1024_768)
            })
        );
    }

    #[test]
    fn padded_rows_must_fit_the_buffer() {
        // 16 visible bytes per row, 32 byte pitch: the last pixel ends at
        // byte 3 * 32 + 16.
        let fb = FramebufferDescriptor::new(0x1000, 4, 4, 32, 32, PixelOrder::Bgr, 112);
        assert!(fb.is_ok());

        let err = FramebufferDescriptor::new(0x1000, 4, 4, 32, 32, PixelOrder::Bgr, 64);
        assert_eq!(
            err,
            Err(DescriptorError::SizeTooSmall {
                size: 64,
                required: 112
            })
        );
    }

    #[test]
    fn rejects_short_pitch() {
        let err = FramebufferDescriptor::new(
            0x3C10_0000,
            1024,
            768,
            4092,
            32,
            PixelOrder::Bgr,
            SIZE_1024_768,
        );
        assert!(matches!(err, Err(DescriptorError::PitchTooSmall { .. })));
    }

    #[test]
    fn rejects_odd_depths() {
        for depth in [0, 12, 40] {
            let err =
                FramebufferDescriptor::new(0x1000, 4, 4, 64, depth, PixelOrder::Rgb, 1 << 16);
            assert_eq!(err, Err(DescriptorError::UnsupportedDepth(depth)));
        }
    }

    #[test]
    fn pixel_order_round_trips_raw_values() {
        assert_eq!(PixelOrder::from_raw(0), Some(PixelOrder::Bgr));
        assert_eq!(PixelOrder::from_raw(1), Some(PixelOrder::Rgb));
        assert_eq!(PixelOrder::from_raw(2), None);
    }
}
