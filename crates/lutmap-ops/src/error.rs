//! Error types for the lookup operator.

use lutmap_lut::LutError;
use thiserror::Error;

/// Error type for operator construction and tile rendering.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Tile width or height is zero.
    #[error("invalid tile size: {width}x{height}")]
    InvalidTileSize {
        /// Requested tile width
        width: u32,
        /// Requested tile height
        height: u32,
    },

    /// Table construction or tile lookup failed.
    #[error(transparent)]
    Lut(#[from] LutError),

    /// Raster allocation or copy failed.
    #[error(transparent)]
    Core(#[from] lutmap_core::Error),
}

/// Result type for operator functions.
pub type OpsResult<T> = Result<T, OpsError>;
