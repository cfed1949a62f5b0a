//! Rectangles in absolute raster coordinates.
//!
//! Rasters, tiles and ROI masks all carry their own [`Rect`] bounds in a
//! shared pixel coordinate space. A tile at `(256, 512)` addresses the same
//! pixel as the full image does at `(256, 512)`.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   tile   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! Left/top edges are inclusive, right/bottom edges exclusive.
//!
//! # Usage
//!
//! ```rust
//! use lutmap_core::Rect;
//!
//! let image = Rect::from_size(100, 100);
//! let tiles: Vec<Rect> = image.tiles(64, 64).collect();
//! assert_eq!(tiles.len(), 4);
//! assert_eq!(tiles[3], Rect::new(64, 64, 36, 36));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate of the bottom edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if the right and bottom edges are representable as `u32`.
    #[inline]
    pub const fn fits_u32(&self) -> bool {
        self.x.checked_add(self.width).is_some() && self.y.checked_add(self.height).is_some()
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    ///
    /// ```rust
    /// use lutmap_core::Rect;
    ///
    /// let rect = Rect::new(10, 10, 100, 100);
    /// assert!(rect.contains(10, 10));
    /// assert!(rect.contains(109, 109));
    /// assert!(!rect.contains(110, 110));
    /// ```
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && (px as u64) < self.x as u64 + self.width as u64
            && py >= self.y
            && (py as u64) < self.y as u64 + self.height as u64
    }

    /// Returns `true` if this rectangle fully contains another.
    ///
    /// An empty rectangle is contained in anything. Edges are compared in
    /// `u64`, so a rectangle reaching past `u32::MAX` is never contained in
    /// one that doesn't.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.x as u64 + other.width as u64 <= self.x as u64 + self.width as u64
                && other.y as u64 + other.height as u64 <= self.y as u64 + self.height as u64)
    }

    /// Returns the intersection, or `None` if the rectangles don't overlap.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Iterates all (x, y) coordinates row by row.
    #[inline]
    pub fn iter_coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }

    /// Splits this rectangle into a row-major grid of tiles.
    ///
    /// Tiles on the right and bottom edges are clipped to this rectangle.
    /// A zero tile dimension yields no tiles.
    pub fn tiles(&self, tile_width: u32, tile_height: u32) -> impl Iterator<Item = Rect> + '_ {
        let (step_x, step_y) = if tile_width == 0 || tile_height == 0 || self.is_empty() {
            (0, 0)
        } else {
            (tile_width, tile_height)
        };
        let rows = if step_y == 0 { 0 } else { self.height.div_ceil(step_y) };
        let cols = if step_x == 0 { 0 } else { self.width.div_ceil(step_x) };
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| {
                let x = self.x + col * step_x;
                let y = self.y + row * step_y;
                Rect::new(
                    x,
                    y,
                    step_x.min(self.right() - x),
                    step_y.min(self.bottom() - y),
                )
            })
        })
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.area(), 5000);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 100, 100);
        assert!(r.contains(10, 10));
        assert!(r.contains(109, 109));
        assert!(!r.contains(110, 110));
        assert!(!r.contains(5, 50));
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = Rect::new(0, 0, 100, 100);
        assert!(outer.contains_rect(&Rect::new(10, 10, 50, 50)));
        assert!(!outer.contains_rect(&Rect::new(60, 60, 50, 50)));
        assert!(outer.contains_rect(&Rect::new(500, 500, 0, 0)));
    }

    #[test]
    fn test_rect_past_coordinate_space() {
        let outer = Rect::from_size(10, 10);
        let wide = Rect::new(u32::MAX - 1, 0, 4, 1);
        assert!(!wide.fits_u32());
        assert_eq!(wide.right(), u32::MAX);
        assert!(!outer.contains_rect(&wide));
        assert!(!Rect::new(u32::MAX - 2, 0, 2, 1).contains_rect(&wide));
        assert!(wide.contains(u32::MAX - 1, 0));
        assert!(outer.fits_u32());
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
        assert!(a.intersect(&Rect::new(200, 200, 50, 50)).is_none());
    }

    #[test]
    fn test_rect_iter_coords() {
        let r = Rect::new(3, 7, 2, 2);
        let coords: Vec<_> = r.iter_coords().collect();
        assert_eq!(coords, vec![(3, 7), (4, 7), (3, 8), (4, 8)]);
    }

    #[test]
    fn test_tiles_cover_exactly() {
        let r = Rect::new(5, 5, 100, 70);
        let tiles: Vec<_> = r.tiles(32, 32).collect();
        assert_eq!(tiles.len(), 4 * 3);
        assert_eq!(tiles[0], Rect::new(5, 5, 32, 32));
        assert_eq!(tiles[3], Rect::new(101, 5, 4, 32));
        assert_eq!(tiles[11], Rect::new(101, 69, 4, 6));
        let covered: u64 = tiles.iter().map(Rect::area).sum();
        assert_eq!(covered, r.area());
    }

    #[test]
    fn test_tiles_degenerate() {
        assert_eq!(Rect::new(0, 0, 10, 10).tiles(0, 4).count(), 0);
        assert_eq!(Rect::new(0, 0, 0, 10).tiles(4, 4).count(), 0);
    }
}
