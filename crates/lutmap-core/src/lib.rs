//! # lutmap-core
//!
//! Core raster types for table-driven pixel remapping.
//!
//! - [`SampleType`], [`Sample`] - Runtime tag and trait for the supported element types
//! - [`PixelFormat`] - Element type plus band count
//! - [`Rect`] - Rectangles in absolute pixel coordinates, tile splitting
//! - [`Raster`], [`RasterBuf`] - Typed and type-erased pixel buffers
//! - [`Colormap`] - Palette for indexed-color rasters
//!
//! ## Crate Structure
//!
//! ```text
//! lutmap-core (this crate)
//!    ^
//!    |
//!    +-- lutmap-lut (lookup table, tile engine, colormap transform)
//!    +-- lutmap-ops (operator layer, tile scheduling)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for [`SampleType`], [`PixelFormat`] and [`Rect`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colormap;
pub mod error;
pub mod format;
pub mod raster;
pub mod rect;
pub mod sample;

pub use colormap::{Colormap, MAX_COLORMAP_ENTRIES};
pub use error::{Error, Result};
pub use format::{PixelFormat, SampleType};
pub use raster::{Raster, RasterBuf};
pub use rect::Rect;
pub use sample::Sample;
