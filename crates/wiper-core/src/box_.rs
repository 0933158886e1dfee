//! Box - Rectangle regions
//!
//! Used for connected-component bounds and for annotation rendering.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; `w` and `h` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create the smallest box covering the inclusive pixel extent
    /// `[xmin, xmax] x [ymin, ymax]`.
    pub fn from_extent(xmin: u32, ymin: u32, xmax: u32, ymax: u32) -> Self {
        let (x0, x1) = (xmin.min(xmax) as i32, xmin.max(xmax) as i32);
        let (y0, y1) = (ymin.min(ymax) as i32, ymin.max(ymax) as i32);
        Self {
            x: x0,
            y: y0,
            w: x1 - x0 + 1,
            h: y1 - y0 + 1,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Clip this box to an image of size `width` x `height`.
    ///
    /// Returns `None` if nothing of the box lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Box> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Box::new_unchecked(x0, y0, x1 - x0, y1 - y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_new_rejects_negative() {
        assert!(Box::new(0, 0, -1, 3).is_err());
        assert!(Box::new(0, 0, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_from_extent_is_inclusive() {
        let b = Box::from_extent(2, 3, 5, 3);
        assert_eq!(b, Box::new_unchecked(2, 3, 4, 1));
        assert_eq!(b.area(), 4);
        assert!(b.contains_point(5, 3));
        assert!(!b.contains_point(6, 3));
    }

    #[test]
    fn test_clip_to() {
        let b = Box::new_unchecked(-2, 8, 5, 5);
        assert_eq!(b.clip_to(10, 10), Some(Box::new_unchecked(0, 8, 3, 2)));
        assert_eq!(Box::new_unchecked(20, 0, 2, 2).clip_to(10, 10), None);
    }
}
