//! Pixel-perfect collision detection
//!
//! Ships and lasers are non-rectangular, so overlap is tested on per-pixel
//! silhouettes rather than bounding boxes. Two entities collide iff at least
//! one opaque pixel of each lands on the same screen pixel.

use glam::Vec2;

/// Alpha at or above which a pixel counts as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// Opaque-pixel silhouette of a sprite, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Fully solid mask
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask by evaluating `solid` for every pixel
    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self { width, height, bits }
    }

    /// Build a mask from an alpha channel (row-major, `width * height` values)
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        Self::from_fn(width, height, |x, y| {
            alpha
                .get((y * width + x) as usize)
                .is_some_and(|&a| a >= ALPHA_THRESHOLD)
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel is solid; out-of-range pixels are empty
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = solid;
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First overlapping pixel when `other` is placed at `offset` relative to
    /// this mask's origin. The point is in this mask's coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (ox, oy) = offset;

        // Intersection of both rectangles, in this mask's space
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i32).min(self.width as i32);
        let y1 = (oy + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }

    /// Whether the masks share a solid pixel at the given offset
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }
}

/// Anything with a screen position and a collision silhouette
pub trait Collidable {
    /// Top-left corner in screen space
    fn position(&self) -> Vec2;
    fn mask(&self) -> &Mask;
}

/// Pixel-perfect overlap test between two positioned entities
pub fn collide<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let offset = b.position() - a.position();
    // Round half away from zero keeps collide(a, b) == collide(b, a)
    let offset = (offset.x.round() as i32, offset.y.round() as i32);
    a.mask().overlaps(b.mask(), offset)
}
