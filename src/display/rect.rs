//! PixelRect - integer rectangle in physical (virtual screen) pixels
//!
//! Mirrors the platform's rectangle layout: right and bottom are exclusive.

use super::pixels::PhysicalSize;

/// A rectangle defined by its bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Create a new rectangle from bounds
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from position and size
    pub fn from_pos_size(x: i32, y: i32, size: PhysicalSize) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(size.width as i32),
            bottom: y.saturating_add(size.height as i32),
        }
    }

    /// Rectangle at the origin with the given size
    pub fn from_size(size: PhysicalSize) -> Self {
        Self::from_pos_size(0, 0, size)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Size, with negative extents clamped to zero
    pub fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.width().max(0) as u32, self.height().max(0) as u32)
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.left, self.top)
    }

    /// Translate rectangle by offset
    pub fn translate(&self, dx: i32, dy: i32) -> PixelRect {
        PixelRect::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Expand rectangle by given amounts
    pub fn expand(&self, left: i32, top: i32, right: i32, bottom: i32) -> PixelRect {
        PixelRect::new(
            self.left - left,
            self.top - top,
            self.right + right,
            self.bottom + bottom,
        )
    }

    /// Check if rectangle is empty (zero or negative area)
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}
