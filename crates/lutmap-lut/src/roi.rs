//! ROI mask adapter.
//!
//! The region of interest arrives already rasterized: a single-band `u8`
//! mask where non-zero means "inside". [`RoiMask`] shares that raster
//! read-only between every tile computation and answers inside/outside
//! queries in two ways, each exposed as a [`MaskProbe`]:
//!
//! - [`RandomProbe`] probes the shared mask pixel by pixel; positions
//!   beyond the mask's own bounds are outside.
//! - [`ExtendedTile`] holds a per-tile copy covering the tile, zero
//!   filled wherever the tile extends past the mask. Probing never leaves
//!   the tile's own buffer.
//!
//! The tile engine is generic over the probe, so the choice is made once
//! per tile rather than per pixel.

use std::sync::Arc;

use lutmap_core::{Raster, Rect};

use crate::{LutError, LutResult};

/// Shared, read-only rasterized region of interest.
#[derive(Debug, Clone)]
pub struct RoiMask {
    mask: Arc<Raster<u8>>,
}

impl RoiMask {
    /// Wraps a single-band mask raster. Non-zero samples are inside.
    pub fn from_raster(mask: Raster<u8>) -> LutResult<Self> {
        Self::from_shared(Arc::new(mask))
    }

    /// Wraps a mask raster already shared with the caller.
    pub fn from_shared(mask: Arc<Raster<u8>>) -> LutResult<Self> {
        if mask.bands() != 1 {
            return Err(LutError::InvalidMask(mask.bands()));
        }
        Ok(Self { mask })
    }

    /// Mask covering exactly `rect`, every pixel inside.
    pub fn from_rect(rect: Rect) -> LutResult<Self> {
        Self::from_raster(Raster::filled(rect, 1, 1)?)
    }

    /// Mask with extent `bounds`, inside wherever one of `rects` covers.
    pub fn from_rects(bounds: Rect, rects: &[Rect]) -> LutResult<Self> {
        let mut mask = Raster::new(bounds, 1)?;
        for rect in rects {
            if let Some(r) = rect.intersect(&bounds) {
                for y in r.y..r.bottom() {
                    mask.row_span_mut(r.x, y, r.width).fill(1);
                }
            }
        }
        Self::from_raster(mask)
    }

    /// Extent of the rasterized mask, independent of any tile.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.mask.bounds()
    }

    /// The underlying mask raster.
    #[inline]
    pub fn raster(&self) -> &Raster<u8> {
        &self.mask
    }

    /// Random-access test: `true` if (x, y) is inside the ROI.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.mask.try_get(x, y, 0).is_some_and(|v| v != 0)
    }

    /// Copies the mask over `rect`, zero filling outside the mask bounds.
    pub fn extended(&self, rect: Rect) -> LutResult<Raster<u8>> {
        let mut tile = Raster::new(rect, 1)?;
        tile.copy_from(&self.mask)?;
        Ok(tile)
    }

    /// Number of inside pixels.
    pub fn area(&self) -> usize {
        self.mask.data().iter().filter(|&&v| v != 0).count()
    }
}

/// Position → inside-ROI capability used by the tile engine.
pub trait MaskProbe {
    /// `true` if (x, y) participates in the lookup.
    fn inside(&self, x: u32, y: u32) -> bool;
}

/// Probes the shared mask directly.
#[derive(Debug, Clone, Copy)]
pub struct RandomProbe<'a>(pub &'a RoiMask);

impl MaskProbe for RandomProbe<'_> {
    #[inline]
    fn inside(&self, x: u32, y: u32) -> bool {
        self.0.contains(x, y)
    }
}

/// Probes a zero-extended per-tile copy of the mask.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedTile<'a>(pub &'a Raster<u8>);

impl MaskProbe for ExtendedTile<'_> {
    #[inline]
    fn inside(&self, x: u32, y: u32) -> bool {
        self.0.try_get(x, y, 0).is_some_and(|v| v != 0)
    }
}

/// Probe for tables without an ROI; every position is inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMask;

impl MaskProbe for NoMask {
    #[inline]
    fn inside(&self, _x: u32, _y: u32) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raster_rejects_multiband() {
        let r = Raster::<u8>::new(Rect::from_size(4, 4), 3).unwrap();
        assert!(matches!(RoiMask::from_raster(r), Err(LutError::InvalidMask(3))));
    }

    #[test]
    fn test_contains_outside_bounds() {
        let roi = RoiMask::from_rect(Rect::new(10, 10, 5, 5)).unwrap();
        assert!(roi.contains(10, 10));
        assert!(roi.contains(14, 14));
        assert!(!roi.contains(15, 14));
        assert!(!roi.contains(0, 0));
        assert_eq!(roi.area(), 25);
    }

    #[test]
    fn test_from_rects() {
        let roi = RoiMask::from_rects(
            Rect::from_size(10, 10),
            &[Rect::new(0, 0, 2, 2), Rect::new(8, 8, 5, 5)],
        )
        .unwrap();
        assert_eq!(roi.area(), 4 + 4);
        assert!(roi.contains(9, 9));
        assert!(!roi.contains(5, 5));
    }

    #[test]
    fn test_extended_zero_fills() {
        let roi = RoiMask::from_rect(Rect::new(4, 4, 4, 4)).unwrap();
        let tile = roi.extended(Rect::new(6, 6, 4, 4)).unwrap();
        assert_eq!(tile.bounds(), Rect::new(6, 6, 4, 4));
        assert_eq!(tile.get(6, 6, 0), 1);
        assert_eq!(tile.get(7, 7, 0), 1);
        assert_eq!(tile.get(8, 6, 0), 0);
        assert_eq!(tile.get(9, 9, 0), 0);
    }

    #[test]
    fn test_probes_agree() {
        let roi = RoiMask::from_rects(Rect::from_size(8, 8), &[Rect::new(2, 1, 3, 5)]).unwrap();
        let window = Rect::new(4, 4, 8, 8);
        let tile = roi.extended(window).unwrap();
        let random = RandomProbe(&roi);
        let extended = ExtendedTile(&tile);
        for (x, y) in window.iter_coords() {
            assert_eq!(random.inside(x, y), extended.inside(x, y), "at ({x}, {y})");
        }
        assert!(NoMask.inside(1000, 1000));
    }
}
