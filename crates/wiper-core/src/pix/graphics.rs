//! Graphics rendering functions
//!
//! Draws rectangle outlines onto images. Used to mark detected regions
//! on annotated output.

use super::{PixMut, PixelDepth};
use crate::box_::Box;
use crate::error::Result;

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };

    /// Convert to grayscale value (0-255)
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Compose as 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        crate::color::compose_rgb(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Generate the points of a box outline drawn `width` pixels thick,
/// growing inward from the box edges.
///
/// Points are not clipped; each point is emitted once.
pub fn generate_box_points(b: &Box, width: u32) -> Vec<(i32, i32)> {
    if b.is_empty() {
        return Vec::new();
    }
    let t = (width.max(1) as i32).min(((b.w.min(b.h) + 1) / 2).max(1));
    let mut pts = Vec::with_capacity((2 * (b.w + b.h) * t) as usize);

    for y in b.y..b.bottom() {
        let in_band_y = y < b.y + t || y >= b.bottom() - t;
        for x in b.x..b.right() {
            let in_band_x = x < b.x + t || x >= b.right() - t;
            if in_band_y || in_band_x {
                pts.push((x, y));
            }
        }
    }
    pts
}

impl PixMut {
    /// Render a box outline with a specific color.
    ///
    /// On gray images the color is reduced with [`Color::to_gray`].
    /// Points outside the image are skipped.
    pub fn render_box_color(&mut self, b: &Box, width: u32, color: Color) -> Result<()> {
        let val = match self.depth() {
            PixelDepth::Bit32 => color.to_pixel32(),
            PixelDepth::Bit16 => u32::from(color.to_gray()) * 257,
            PixelDepth::Bit8 => u32::from(color.to_gray()),
        };
        self.render_box_value(b, width, val)
    }

    /// Render a box outline with a raw pixel value.
    pub fn render_box_value(&mut self, b: &Box, width: u32, val: u32) -> Result<()> {
        if b.clip_to(self.width(), self.height()).is_none() {
            return Ok(());
        }
        let w = self.width() as i32;
        let h = self.height() as i32;
        for (x, y) in generate_box_points(b, width) {
            if x >= 0 && y >= 0 && x < w && y < h {
                self.set_pixel_unchecked(x as u32, y as u32, val);
            }
        }
        Ok(())
    }
}
