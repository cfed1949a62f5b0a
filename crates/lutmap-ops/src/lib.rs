//! # lutmap-ops
//!
//! Lookup-table operator for tiled raster pipelines.
//!
//! This crate turns a table and its parameters into an operator a host
//! scheduler can drive tile by tile, and provides a reference scheduler.
//!
//! # Modules
//!
//! - [`LookupParams`] - Offsets, ROI, no-data and layout hint
//! - [`LookupOp`] - Built table plus negotiated destination format
//! - [`TileTransform`] - Tile computation seam used by the schedulers
//! - [`render_serial`] / [`parallel::render`] - Split, compute and stitch
//!
//! # Example
//!
//! ```rust
//! use lutmap_core::{PixelFormat, Raster, RasterBuf, Rect, SampleType};
//! use lutmap_lut::{NoDataRange, RoiMask};
//! use lutmap_ops::{render_serial, LookupOp, LookupParams};
//!
//! let bounds = Rect::from_size(8, 8);
//! let src: RasterBuf = Raster::filled(bounds, 1, 7u8).unwrap().into();
//!
//! let params = LookupParams::new()
//!     .with_roi(RoiMask::from_rect(Rect::new(0, 0, 4, 8)).unwrap())
//!     .with_no_data(NoDataRange::point(0.0))
//!     .with_destination_no_data(255.0);
//! let identity: Vec<u8> = (0..=255).collect();
//! let op = LookupOp::new(identity, PixelFormat::new(SampleType::U8, 1), params).unwrap();
//!
//! let out = render_serial(&op, &src, 4, 4).unwrap();
//! assert_eq!(out.get_f64(3, 0, 0), 7.0);
//! assert_eq!(out.get_f64(4, 0, 0), 255.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod op;
mod params;
mod render;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use op::{IndexedImage, LookupOp, TileTransform};
pub use params::LookupParams;
pub use render::render_serial;
