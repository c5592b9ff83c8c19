//! # Pixel Surface
//!
//! A bounds-checked view of a 32-bit framebuffer. Every operation takes
//! `(x, y)` coordinates and refuses anything outside
//! `[0, width) × [0, height)` instead of writing past the visible area.
//!
//! Rows may be padded: pixel `(x, y)` lives at word `y * stride + x`, where
//! the stride is the firmware-reported pitch divided by four.
//!
//! ```
//! use kernel_fb::{Color, PixelSurface};
//!
//! let mut pixels = [0u32; 8 * 4];
//! let mut fb = PixelSurface::from_slice(&mut pixels, 8, 4, 8)?;
//! fb.clear_screen();
//! fb.set_pixel(3, 1, Color::RED)?;
//! assert_eq!(fb.pixel(3, 1), Some(Color::RED));
//! assert!(fb.set_pixel(8, 0, Color::RED).is_err());
//! # Ok::<(), kernel_fb::SurfaceError>(())
//! ```
//!
//! ## Flood Fill
//!
//! [`PixelSurface::flood_fill`] is a 4-connected fill driven by an explicit
//! work list. A pixel is painted when it is pushed, so it is never pushed
//! twice and the list never holds more than `width * height` points.
//! Without the `alloc` feature use [`PixelSurface::flood_fill_in`] with a
//! caller-provided arena.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod color;
mod fill;
mod surface;

pub use color::Color;
pub use fill::{ArenaStack, FillReport, WorkList};
pub use surface::PixelSurface;

/// A pixel coordinate.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("pixel ({x}, {y}) is outside the surface")]
    OutOfBounds { x: u32, y: u32 },
    #[error("{0} bits per pixel is not supported")]
    UnsupportedDepth(u32),
    #[error("buffer of {len} pixels is smaller than the {required} the surface spans")]
    BufferTooSmall { len: usize, required: usize },
    #[error("flood fill work list of {capacity} points is full")]
    WorkListExhausted { capacity: usize },
}
