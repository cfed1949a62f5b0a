//! Error types for lutmap-core operations.
//!
//! Covers the failure modes of raster and colormap construction:
//! buffer sizes that do not match the declared geometry, band count and
//! sample type mismatches between rasters, and regions that fall outside a
//! raster.
//!
//! # Usage
//!
//! ```rust
//! use lutmap_core::{Error, Rect, Result};
//!
//! fn check_inside(bounds: Rect, region: Rect) -> Result<()> {
//!     if !bounds.contains_rect(&region) {
//!         return Err(Error::region_outside(region, bounds));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_inside(Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10)).is_err());
//! ```

use crate::{Rect, SampleType};
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or combining rasters and colormaps.
#[derive(Debug, Error)]
pub enum Error {
    /// Width, height or band count is unusable.
    #[error("invalid dimensions: {width}x{height}x{bands} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested band count
        bands: usize,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Sample buffer length does not match `width * height * bands`.
    #[error("buffer length mismatch: expected {expected} samples, got {got}")]
    BufferLength {
        /// Samples required by the geometry
        expected: usize,
        /// Samples supplied
        got: usize,
    },

    /// Two rasters disagree on band count.
    #[error("band mismatch: expected {expected}, got {got}")]
    BandMismatch {
        /// Expected band count
        expected: usize,
        /// Actual band count
        got: usize,
    },

    /// Two rasters disagree on sample type.
    #[error("sample type mismatch: expected {expected}, got {got}")]
    SampleTypeMismatch {
        /// Expected sample type
        expected: SampleType,
        /// Actual sample type
        got: SampleType,
    },

    /// A region is not fully contained in a raster.
    #[error("region {region} lies outside raster bounds {bounds}")]
    RegionOutside {
        /// Requested region
        region: Rect,
        /// Raster bounds
        bounds: Rect,
    },

    /// Colormap channels are empty, ragged or too long.
    #[error("invalid colormap: {0}")]
    InvalidColormap(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        width: u32,
        height: u32,
        bands: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            bands,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BandMismatch`] error.
    #[inline]
    pub fn band_mismatch(expected: usize, got: usize) -> Self {
        Self::BandMismatch { expected, got }
    }

    /// Creates an [`Error::SampleTypeMismatch`] error.
    #[inline]
    pub fn sample_type_mismatch(expected: SampleType, got: SampleType) -> Self {
        Self::SampleTypeMismatch { expected, got }
    }

    /// Creates an [`Error::RegionOutside`] error.
    #[inline]
    pub fn region_outside(region: Rect, bounds: Rect) -> Self {
        Self::RegionOutside { region, bounds }
    }
}
