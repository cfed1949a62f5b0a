//! LUT error types.

use lutmap_core::{PixelFormat, Rect};
use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building or applying a lookup table.
///
/// All of these are configuration or calling errors. Per-pixel conditions
/// (out-of-domain samples, mask positions outside the ROI) never fail.
#[derive(Debug, Error)]
pub enum LutError {
    /// Table has no bands or a band with no entries.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Offsets don't match the table bands.
    #[error("invalid offsets: expected 1 or {bands}, got {got}")]
    InvalidOffsets {
        /// Number of table bands
        bands: usize,
        /// Number of offsets supplied
        got: usize,
    },

    /// Source format has no bands.
    #[error("invalid source format: {0}")]
    InvalidSource(PixelFormat),

    /// A no-data range is malformed.
    #[error("invalid no-data range [{min}, {max}]")]
    InvalidRange {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Per-band no-data ranges don't match the source band count.
    #[error("no-data band mismatch: source has {source_bands} bands, got {ranges} ranges")]
    NoDataBands {
        /// Source band count
        source_bands: usize,
        /// Ranges supplied
        ranges: usize,
    },

    /// ROI or no-data configured without a destination no-data value.
    #[error("destination no-data value is required when ROI or no-data is configured")]
    MissingDestinationNoData,

    /// ROI mask raster must have exactly one band.
    #[error("ROI mask must be single band, got {0} bands")]
    InvalidMask(usize),

    /// Tile rasters don't match the table's source or destination format.
    #[error("tile format mismatch: expected {expected}, got {got}")]
    TileFormat {
        /// Format the table was built for
        expected: PixelFormat,
        /// Format of the supplied raster
        got: PixelFormat,
    },

    /// Destination rectangle not covered by a tile raster.
    #[error("destination rect {rect} not covered by {which} raster bounds {bounds}")]
    TileBounds {
        /// Requested destination rectangle
        rect: Rect,
        /// Which raster was too small ("source" or "destination")
        which: &'static str,
        /// That raster's bounds
        bounds: Rect,
    },

    /// Error from the core raster types.
    #[error(transparent)]
    Core(#[from] lutmap_core::Error),
}
