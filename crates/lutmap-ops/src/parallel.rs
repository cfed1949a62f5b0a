//! Parallel tiled rendering using Rayon.
//!
//! Tiles are independent: each worker computes its tile from its own
//! source tile against the shared operator, then the tiles are stitched in
//! order on the calling thread.
//!
//! # Example
//!
//! ```rust
//! use lutmap_core::{PixelFormat, Raster, RasterBuf, Rect, SampleType};
//! use lutmap_ops::{parallel, LookupOp, LookupParams};
//!
//! let table: Vec<f32> = (0..256).map(|v| v as f32 / 255.0).collect();
//! let op = LookupOp::new(table, PixelFormat::new(SampleType::U8, 3), LookupParams::new()).unwrap();
//!
//! let src: RasterBuf = Raster::filled(Rect::from_size(300, 200), 3, 255u8).unwrap().into();
//! let out = parallel::render(&op, &src, 64, 64).unwrap();
//! assert_eq!(out.get_f64(299, 199, 2), 1.0);
//! ```

use lutmap_core::{RasterBuf, Rect};
use rayon::prelude::*;
use tracing::debug;

use crate::render::{check_tile_size, render_tile};
use crate::{OpsResult, TileTransform};

/// Renders `source` through `op`, computing tiles on the rayon pool.
///
/// The result is identical to [`render_serial`](crate::render_serial).
pub fn render<T: TileTransform + ?Sized>(
    op: &T,
    source: &RasterBuf,
    tile_width: u32,
    tile_height: u32,
) -> OpsResult<RasterBuf> {
    let bounds = check_tile_size(source, tile_width, tile_height)?;
    let rects: Vec<Rect> = bounds.tiles(tile_width, tile_height).collect();
    debug!(bounds = %bounds, tiles = rects.len(), "Rendering in parallel");

    let tiles = rects
        .par_iter()
        .map(|&rect| render_tile(op, source, rect))
        .collect::<OpsResult<Vec<_>>>()?;

    let mut dst = RasterBuf::new(op.dest_format(), bounds)?;
    for tile in &tiles {
        dst.copy_from(tile)?;
    }
    Ok(dst)
}
