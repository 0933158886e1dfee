//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological operations.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - takes part in the operation
    Hit = 1,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create a new structuring element of don't-care positions with the
    /// origin at the center.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// The 3x3 square: a pixel and its 8 neighbors.
    pub fn neighborhood_8() -> Self {
        Self {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: vec![SelElement::Hit; 9],
        }
    }

    /// Create a structuring element from a string pattern
    ///
    /// # Arguments
    /// * `pattern` - Rows of 'x' for hit and '.' for don't care; whitespace
    ///   around each row is ignored
    /// * `origin_x` - X coordinate of origin
    /// * `origin_y` - Y coordinate of origin
    pub fn from_string(pattern: &str, origin_x: u32, origin_y: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut sel = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let elem = match c {
                    'x' => SelElement::Hit,
                    '.' => SelElement::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {:?}",
                            other
                        )));
                    }
                };
                sel.set_element(x as u32, y as u32, elem);
            }
        }
        sel.set_origin(origin_x, origin_y)?;
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{}",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the element at (x, y)
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set the element at (x, y); out-of-range positions are ignored.
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Count the hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Offsets `(dx, dy)` of the hit elements relative to the origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (w, cx, cy) = (self.width, self.cx as i32, self.cy as i32);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == SelElement::Hit)
            .map(move |(i, _)| {
                let x = (i as u32 % w) as i32;
                let y = (i as u32 / w) as i32;
                (x - cx, y - cy)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighborhood_8() {
        let sel = Sel::neighborhood_8();
        assert_eq!(sel, Sel::create_square(3).unwrap());
        assert_eq!(sel.hit_count(), 9);
        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert!(offsets.contains(&(-1, -1)));
        assert!(offsets.contains(&(0, 0)));
        assert!(offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_from_string() {
        let sel = Sel::from_string(
            "
            .x.
            xxx
            .x.
            ",
            1,
            1,
        )
        .unwrap();
        assert_eq!(sel.hit_count(), 5);
        assert_eq!(sel.get_element(0, 0), Some(SelElement::DontCare));
        assert_eq!(sel.get_element(1, 0), Some(SelElement::Hit));
        let mut offsets: Vec<_> = sel.hit_offsets().collect();
        offsets.sort();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_invalid_sels() {
        assert!(Sel::new(0, 3).is_err());
        assert!(Sel::from_string("xx\nx", 0, 0).is_err());
        assert!(Sel::from_string("xo", 0, 0).is_err());
        assert!(Sel::from_string("xx", 2, 0).is_err());
    }
}
