//! # lutmap-lut
//!
//! Lookup tables that remap raster samples, tile by tile.
//!
//! # Components
//!
//! - [`LookupTable`] - Per-band output arrays, built once with
//!   [`LookupTableBuilder`] and immutable afterwards
//! - [`negotiate`] - Destination pixel format from source and table formats
//! - [`RoiMask`] - Shared rasterized region of interest with random-probe and
//!   per-tile extended access
//! - [`NoData`], [`NoDataRange`] - Sentinel source values to exclude
//! - [`LookupTable::lookup_tile`] - The tile engine
//! - [`LookupTable::transform_colormap`] - Palette path for indexed rasters
//!
//! # Usage
//!
//! ```rust
//! use lutmap_core::{PixelFormat, Raster, RasterBuf, Rect, SampleType};
//! use lutmap_lut::{LookupTable, NoDataRange, RoiMask};
//!
//! let bounds = Rect::from_size(4, 4);
//! let src: RasterBuf = Raster::filled(bounds, 1, 200u8).unwrap().into();
//!
//! let identity: Vec<u8> = (0..=255).collect();
//! let table = LookupTable::builder(identity, PixelFormat::new(SampleType::U8, 1))
//!     .roi(RoiMask::from_rect(Rect::new(0, 0, 2, 2)).unwrap())
//!     .no_data(NoDataRange::point(0.0))
//!     .destination_no_data(9.0)
//!     .build()
//!     .unwrap();
//!
//! let mut dst = RasterBuf::new(table.dest_format(), bounds).unwrap();
//! table.lookup_tile(&src, &mut dst, bounds, None).unwrap();
//! assert_eq!(dst.get_f64(0, 0, 0), 200.0); // inside the ROI
//! assert_eq!(dst.get_f64(3, 3, 0), 9.0);   // outside the ROI
//! ```
//!
//! # Concurrency
//!
//! Nothing here spawns threads or locks. A built table is `Send + Sync` and
//! every tile operation takes `&self`; callers may compute tiles of one
//! table on as many threads as they like.
//!
//! # Dependencies
//!
//! - `lutmap-core` - Raster types
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod colormap;
mod engine;
mod error;
pub mod negotiate;
mod nodata;
pub mod roi;
mod table;

pub use error::{LutError, LutResult};
pub use negotiate::{BROADCAST_BELOW, dest_band_count, is_broadcast, negotiate};
pub use nodata::{NoData, NoDataMode, NoDataRange};
pub use roi::{ExtendedTile, MaskProbe, NoMask, RandomProbe, RoiMask};
pub use table::{LookupTable, LookupTableBuilder, NoDataConfig, RoiConfig, TableData};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_table_is_shareable() {
        assert_send_sync::<LookupTable>();
        assert_send_sync::<RoiMask>();
    }
}
