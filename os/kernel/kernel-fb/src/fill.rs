use crate::{Point, SurfaceError};

/// Outcome of a flood fill.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FillReport {
    /// Number of pixels recolored.
    pub painted: usize,
}

/// Pending points of a flood fill.
pub trait WorkList {
    /// # Errors
    /// [`SurfaceError::WorkListExhausted`] if there is no room for `point`.
    fn push(&mut self, point: Point) -> Result<(), SurfaceError>;

    fn pop(&mut self) -> Option<Point>;
}

#[cfg(feature = "alloc")]
impl WorkList for alloc::vec::Vec<Point> {
    fn push(&mut self, point: Point) -> Result<(), SurfaceError> {
        Self::push(self, point);
        Ok(())
    }

    fn pop(&mut self) -> Option<Point> {
        Self::pop(self)
    }
}

/// A stack over caller-provided storage.
///
/// For a complete fill of a `width × height` surface the arena needs
/// `width * height` slots.
pub struct ArenaStack<'a> {
    slots: &'a mut [Point],
    len: usize,
}

impl<'a> ArenaStack<'a> {
    pub const fn new(slots: &'a mut [Point]) -> Self {
        Self { slots, len: 0 }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl WorkList for ArenaStack<'_> {
    fn push(&mut self, point: Point) -> Result<(), SurfaceError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(self.len)
            .ok_or(SurfaceError::WorkListExhausted { capacity })?;
        *slot = point;
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<Point> {
        self.len = self.len.checked_sub(1)?;
        Some(self.slots[self.len])
    }
}
