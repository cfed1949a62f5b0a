//! Tiled rendering on the calling thread.
//!
//! A minimal host scheduler: the source bounds are split into tiles, each
//! tile is computed from its own source tile and the results are stitched
//! into one destination raster. [`crate::parallel::render`] does the same
//! on the rayon pool.

use lutmap_core::{RasterBuf, Rect};
use tracing::{debug, trace};

use crate::{OpsError, OpsResult, TileTransform};

/// Renders `source` through `op` one tile at a time.
///
/// # Errors
///
/// [`OpsError::InvalidTileSize`] if either tile dimension is zero, or the
/// first error returned by a tile.
pub fn render_serial<T: TileTransform + ?Sized>(
    op: &T,
    source: &RasterBuf,
    tile_width: u32,
    tile_height: u32,
) -> OpsResult<RasterBuf> {
    let bounds = check_tile_size(source, tile_width, tile_height)?;
    debug!(bounds = %bounds, tile_width, tile_height, "Rendering serially");

    let mut dst = RasterBuf::new(op.dest_format(), bounds)?;
    for rect in bounds.tiles(tile_width, tile_height) {
        let tile = render_tile(op, source, rect)?;
        dst.copy_from(&tile)?;
    }
    Ok(dst)
}

pub(crate) fn check_tile_size(source: &RasterBuf, width: u32, height: u32) -> OpsResult<Rect> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidTileSize { width, height });
    }
    Ok(source.bounds())
}

/// Computes one destination tile from the matching source tile.
pub(crate) fn render_tile<T: TileTransform + ?Sized>(
    op: &T,
    source: &RasterBuf,
    rect: Rect,
) -> OpsResult<RasterBuf> {
    trace!(rect = %rect, "render_tile");
    let src = source.sub_raster(rect)?;
    let mut dst = RasterBuf::new(op.dest_format(), rect)?;
    op.compute_tile(&src, &mut dst, rect)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupOp, LookupParams};
    use lutmap_core::{PixelFormat, Raster, SampleType};

    #[test]
    fn test_zero_tile_size_rejected() {
        let op = LookupOp::new(vec![0u8; 256], PixelFormat::new(SampleType::U8, 1), LookupParams::new())
            .unwrap();
        let src: RasterBuf = Raster::<u8>::new(Rect::from_size(4, 4), 1).unwrap().into();
        assert!(matches!(
            render_serial(&op, &src, 0, 4),
            Err(OpsError::InvalidTileSize { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_offset_bounds_preserved() {
        let doubled: Vec<u16> = (0..256).map(|v| v * 2).collect();
        let op = LookupOp::new(doubled, PixelFormat::new(SampleType::U8, 1), LookupParams::new()).unwrap();
        let bounds = Rect::new(100, 50, 7, 5);
        let data: Vec<u8> = (0..35).collect();
        let src: RasterBuf = Raster::from_vec(bounds, 1, data).unwrap().into();

        let out = render_serial(&op, &src, 3, 2).unwrap();
        assert_eq!(out.bounds(), bounds);
        assert_eq!(out.format(), PixelFormat::new(SampleType::U16, 1));
        for (x, y) in bounds.iter_coords() {
            assert_eq!(out.get_f64(x, y, 0), src.get_f64(x, y, 0) * 2.0);
        }
    }
}
