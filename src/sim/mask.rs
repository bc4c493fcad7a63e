//! Per-pixel opacity masks
//!
//! A `Mask` records which pixels of a sprite are opaque. Collision between two
//! sprites is decided by intersecting their masks at a relative offset, so a
//! bounding-box overlap alone is never a hit.

use glam::{IVec2, Vec2};

use crate::error::ShapeError;

/// Alpha values strictly above this count as opaque
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

/// Bit-packed opacity mask (row-major, 64 pixels per word)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Fully transparent mask
    pub fn new(width: u32, height: u32) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 {
            return Err(ShapeError::ZeroSize { width, height });
        }
        let words_per_row = (width as usize).div_ceil(64);
        Ok(Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        })
    }

    /// Fully opaque mask
    pub fn filled(width: u32, height: u32) -> Result<Self, ShapeError> {
        let mut mask = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        Ok(mask)
    }

    /// Build from an alpha channel (one byte per pixel, row-major)
    pub fn from_alpha(
        width: u32,
        height: u32,
        alpha: &[u8],
        threshold: u8,
    ) -> Result<Self, ShapeError> {
        let mut mask = Self::new(width, height)?;
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(ShapeError::AlphaLength {
                got: alpha.len(),
                expected,
                width,
                height,
            });
        }
        for (i, &a) in alpha.iter().enumerate() {
            if a > threshold {
                mask.set(i as u32 % width, i as u32 / width, true);
            }
        }
        Ok(mask)
    }

    /// Rasterize a signed distance function sampled at pixel centers
    pub fn from_sdf<F>(width: u32, height: u32, sdf: F) -> Result<Self, ShapeError>
    where
        F: Fn(Vec2) -> f32,
    {
        let mut mask = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if sdf(p) <= 0.0 {
                    mask.set(x, y, true);
                }
            }
        }
        Ok(mask)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixel (x, y) is opaque; out-of-range pixels are transparent
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.bits[y as usize * self.words_per_row + x as usize / 64];
        (word >> (x % 64)) & 1 == 1
    }

    /// Set pixel (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.words_per_row + x as usize / 64;
        let bit = 1u64 << (x % 64);
        if opaque {
            self.bits[idx] |= bit;
        } else {
            self.bits[idx] &= !bit;
        }
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if no pixel is opaque
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Read up to 64 bits of `row` starting at pixel `start`
    fn row_bits(&self, row: u32, start: u32, len: u32) -> u64 {
        let base = row as usize * self.words_per_row;
        let word = start as usize / 64;
        let shift = start % 64;

        let lo = self.bits[base + word] >> shift;
        let hi = if shift > 0 && word + 1 < self.words_per_row {
            self.bits[base + word + 1] << (64 - shift)
        } else {
            0
        };
        let value = lo | hi;
        if len >= 64 { value } else { value & ((1u64 << len) - 1) }
    }

    /// Whether any opaque pixel of `other`, placed at `offset` relative to
    /// this mask's origin, coincides with an opaque pixel of this mask
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let (w, h) = (self.width as i64, self.height as i64);
        let (ow, oh) = (other.width as i64, other.height as i64);
        let (ox, oy) = (offset.x as i64, offset.y as i64);

        // Intersection of the two rectangles, in this mask's coordinates
        let x0 = ox.max(0);
        let x1 = (ox + ow).min(w);
        let y0 = oy.max(0);
        let y1 = (oy + oh).min(h);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            let other_y = (y - oy) as u32;
            let mut x = x0;
            while x < x1 {
                let len = (x1 - x).min(64) as u32;
                let a = self.row_bits(y as u32, x as u32, len);
                if a != 0 {
                    let b = other.row_bits(other_y, (x - ox) as u32, len);
                    if a & b != 0 {
                        return true;
                    }
                }
                x += len as i64;
            }
        }
        false
    }
}
