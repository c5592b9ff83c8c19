use crate::{Color, FillReport, Point, SurfaceError, WorkList};
use core::ptr;
use kernel_info::display::FramebufferDescriptor;

// The display engine scans this memory out; every access must happen.
fn load(pixel: &u32) -> u32 {
    // SAFETY: a reference is valid and aligned for reads.
    unsafe { ptr::read_volatile(pixel) }
}

fn store(pixel: &mut u32, raw: u32) {
    // SAFETY: a mutable reference is valid and aligned for writes.
    unsafe { ptr::write_volatile(pixel, raw) }
}

/// A mutable view of framebuffer memory.
pub struct PixelSurface<'fb> {
    pixels: &'fb mut [u32],
    width: u32,
    height: u32,
    stride: usize,
    background: Color,
}

impl<'fb> PixelSurface<'fb> {
    /// Wraps `pixels` as a `width × height` surface whose rows are `stride`
    /// words apart. The background is white.
    ///
    /// # Errors
    /// [`SurfaceError::BufferTooSmall`] if `stride < width` or the slice
    /// does not reach the last pixel.
    pub fn from_slice(
        pixels: &'fb mut [u32],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, SurfaceError> {
        let required = Self::span(width, height, stride);
        if stride < width as usize || pixels.len() < required {
            return Err(SurfaceError::BufferTooSmall {
                len: pixels.len(),
                required,
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
            stride,
            background: Color::WHITE,
        })
    }

    /// Maps the framebuffer described by `descriptor`.
    ///
    /// # Errors
    /// [`SurfaceError::UnsupportedDepth`] unless the depth is 32 bits.
    ///
    /// # Safety
    /// The descriptor must come from a successful negotiation on this
    /// machine, the framebuffer must be identity-mapped, and no other
    /// surface may exist over the same memory for `'fb`.
    pub unsafe fn from_descriptor(descriptor: &FramebufferDescriptor) -> Result<Self, SurfaceError> {
        if descriptor.depth() != 32 {
            return Err(SurfaceError::UnsupportedDepth(descriptor.depth()));
        }

        let stride = descriptor.pitch() as usize / 4;
        let len = descriptor.size() as usize / 4;
        let base = core::ptr::with_exposed_provenance_mut::<u32>(descriptor.base().get() as usize);
        // SAFETY: the caller guarantees exclusive access to `size` bytes at
        // `base`, which the firmware aligned to at least four bytes.
        let pixels = unsafe { core::slice::from_raw_parts_mut(base, len) };

        log::debug!(
            "pixel surface {}x{} stride {stride} at {:#010x}",
            descriptor.width(),
            descriptor.height(),
            descriptor.base()
        );
        Self::from_slice(pixels, descriptor.width(), descriptor.height(), stride)
    }

    /// Sets the color [`clear_pixel`](Self::clear_pixel) and
    /// [`clear_screen`](Self::clear_screen) paint with.
    #[must_use]
    pub const fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Words from the first pixel to one past the last.
    const fn span(width: u32, height: u32, stride: usize) -> usize {
        if width == 0 || height == 0 {
            0
        } else {
            (height as usize - 1) * stride + width as usize
        }
    }

    const fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.stride + x as usize)
        } else {
            None
        }
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let i = self.index(x, y)?;
        Some(Color::from_raw(load(&self.pixels[i])))
    }

    /// # Errors
    /// [`SurfaceError::OutOfBounds`]; nothing is written.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), SurfaceError> {
        let i = self.index(x, y).ok_or(SurfaceError::OutOfBounds { x, y })?;
        store(&mut self.pixels[i], color.raw());
        Ok(())
    }

    /// Paints one pixel with the background color.
    ///
    /// # Errors
    /// [`SurfaceError::OutOfBounds`]; nothing is written.
    pub fn clear_pixel(&mut self, x: u32, y: u32) -> Result<(), SurfaceError> {
        self.set_pixel(x, y, self.background)
    }

    /// Paints every visible pixel with the background color. Row padding is
    /// left untouched.
    pub fn clear_screen(&mut self) {
        let raw = self.background.raw();
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                store(&mut self.pixels[y * self.stride + x], raw);
            }
        }
    }

    /// Fills the 4-connected region around `(x, y)` with `fill`, using a
    /// heap-allocated work list.
    ///
    /// Pixels that already have the fill color, or for which `boundary`
    /// returns `true`, are neither painted nor crossed. Filling an
    /// already-filled region paints nothing.
    ///
    /// # Errors
    /// [`SurfaceError::OutOfBounds`] if the seed is outside the surface.
    #[cfg(feature = "alloc")]
    pub fn flood_fill(
        &mut self,
        x: u32,
        y: u32,
        fill: Color,
        boundary: impl Fn(Color) -> bool,
    ) -> Result<FillReport, SurfaceError> {
        let mut work = alloc::vec::Vec::new();
        self.flood_fill_with(x, y, fill, boundary, &mut work)
    }

    /// Like [`flood_fill`](Self::flood_fill), with the work list in `arena`.
    ///
    /// # Errors
    /// [`SurfaceError::OutOfBounds`] for a seed outside the surface,
    /// [`SurfaceError::WorkListExhausted`] if `arena` is too small; the
    /// region is then only partly filled.
    pub fn flood_fill_in(
        &mut self,
        x: u32,
        y: u32,
        fill: Color,
        boundary: impl Fn(Color) -> bool,
        arena: &mut [Point],
    ) -> Result<FillReport, SurfaceError> {
        let mut work = crate::ArenaStack::new(arena);
        self.flood_fill_with(x, y, fill, boundary, &mut work)
    }

    /// Flood fill over any [`WorkList`].
    ///
    /// # Errors
    /// See [`flood_fill_in`](Self::flood_fill_in).
    pub fn flood_fill_with<W: WorkList + ?Sized>(
        &mut self,
        x: u32,
        y: u32,
        fill: Color,
        boundary: impl Fn(Color) -> bool,
        work: &mut W,
    ) -> Result<FillReport, SurfaceError> {
        let seed = self.index(x, y).ok_or(SurfaceError::OutOfBounds { x, y })?;
        let fill_raw = fill.raw();
        let paint = |pixel: &mut u32| {
            let current = load(pixel);
            if current == fill_raw || boundary(Color::from_raw(current)) {
                return false;
            }
            store(pixel, fill_raw);
            true
        };

        let mut report = FillReport::default();
        if paint(&mut self.pixels[seed]) {
            report.painted += 1;
            work.push(Point::new(x, y))?;
        }

        while let Some(p) = work.pop() {
            let neighbours = [
                (p.x.checked_sub(1), Some(p.y)),
                (p.x.checked_add(1), Some(p.y)),
                (Some(p.x), p.y.checked_sub(1)),
                (Some(p.x), p.y.checked_add(1)),
            ];
            for (nx, ny) in neighbours {
                if let (Some(nx), Some(ny)) = (nx, ny)
                    && let Some(i) = self.index(nx, ny)
                    && paint(&mut self.pixels[i])
                {
                    report.painted += 1;
                    work.push(Point::new(nx, ny))?;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_info::display::PixelOrder;

    #[test]
    fn rejects_short_buffers_and_narrow_strides() {
        let mut px = [0u32; 11];
        assert_eq!(
            PixelSurface::from_slice(&mut px, 4, 3, 4).err(),
            Some(SurfaceError::BufferTooSmall {
                len: 11,
                required: 12
            })
        );
        assert!(PixelSurface::from_slice(&mut px, 4, 2, 3).is_err());
        assert!(PixelSurface::from_slice(&mut px, 3, 3, 4).is_ok());
    }

    #[test]
    fn out_of_bounds_writes_are_refused() {
        let mut px = [0u32; 4 * 3];
        let mut fb = PixelSurface::from_slice(&mut px, 3, 3, 4).unwrap();
        assert_eq!(
            fb.set_pixel(3, 0, Color::RED),
            Err(SurfaceError::OutOfBounds { x: 3, y: 0 })
        );
        assert!(fb.clear_pixel(0, 3).is_err());
        assert_eq!(fb.pixel(3, 0), None);
        // The padding word at index 3 is addressable memory but not a pixel.
        assert_eq!(px, [0; 12]);
    }

    #[test]
    fn clear_screen_skips_row_padding() {
        const PAD: u32 = 0xDEAD_BEEF;
        let mut px = [PAD; 4 * 2];
        let mut fb = PixelSurface::from_slice(&mut px, 3, 2, 4)
            .unwrap()
            .with_background(Color::NAVY);
        fb.clear_screen();
        assert_eq!(px, [0x80, 0x80, 0x80, PAD, 0x80, 0x80, 0x80, PAD]);
    }

    #[test]
    fn clear_pixel_paints_the_background() {
        let mut px = [0u32; 4];
        let mut fb = PixelSurface::from_slice(&mut px, 2, 2, 2).unwrap();
        fb.clear_pixel(1, 1).unwrap();
        assert_eq!(fb.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn fill_stops_at_boundaries() {
        // A vertical black wall in column 2 splits a 5x3 white surface.
        let mut px = [Color::WHITE.raw(); 15];
        let mut fb = PixelSurface::from_slice(&mut px, 5, 3, 5).unwrap();
        for y in 0..3 {
            fb.set_pixel(2, y, Color::BLACK).unwrap();
        }

        let report = fb
            .flood_fill(0, 0, Color::RED, |c| c == Color::BLACK)
            .unwrap();
        assert_eq!(report.painted, 6);
        assert_eq!(fb.pixel(1, 2), Some(Color::RED));
        assert_eq!(fb.pixel(2, 1), Some(Color::BLACK));
        assert_eq!(fb.pixel(3, 0), Some(Color::WHITE));
    }

    #[test]
    fn boundary_seed_paints_nothing() {
        let mut px = [Color::BLACK.raw(); 4];
        let mut fb = PixelSurface::from_slice(&mut px, 2, 2, 2).unwrap();
        let report = fb
            .flood_fill(1, 1, Color::RED, |c| c == Color::BLACK)
            .unwrap();
        assert_eq!(report.painted, 0);
    }

    #[test]
    fn arena_fill_reports_exhaustion() {
        let mut px = [Color::WHITE.raw(); 16];
        let mut fb = PixelSurface::from_slice(&mut px, 4, 4, 4).unwrap();
        let mut arena = [Point::default(); 2];
        assert_eq!(
            fb.flood_fill_in(0, 0, Color::BLACK, |_| false, &mut arena),
            Err(SurfaceError::WorkListExhausted { capacity: 2 })
        );
    }

    #[test]
    fn drawing_lands_in_the_backing_memory() {
        let mut px = [0u32; 12];
        {
            let mut fb = PixelSurface::from_slice(&mut px, 3, 3, 4)
                .unwrap()
                .with_background(Color::NAVY);
            fb.clear_screen();
            fb.set_pixel(1, 1, Color::YELLOW).unwrap();
            fb.flood_fill(0, 2, Color::RED, |c| c == Color::YELLOW).unwrap();
        }
        let red = Color::RED.raw();
        assert_eq!(
            px,
            [
                red, red, red, 0,
                red, Color::YELLOW.raw(), red, 0,
                red, red, red, 0,
            ]
        );
    }

    #[test]
    fn descriptor_depth_must_be_32() {
        let fb = FramebufferDescriptor::new(0x1000, 4, 4, 8, 16, PixelOrder::Rgb, 32).unwrap();
        // SAFETY: rejected before the address is used.
        let surface = unsafe { PixelSurface::from_descriptor(&fb) };
        assert_eq!(surface.err(), Some(SurfaceError::UnsupportedDepth(16)));
    }
}
