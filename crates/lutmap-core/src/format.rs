//! Sample types and pixel formats.
//!
//! # Types
//!
//! - [`SampleType`] - Runtime element type of a raster band (U8, I8, U16, I16, I32, F32, F64)
//! - [`PixelFormat`] - Element type plus band count
//!
//! # Usage
//!
//! ```rust
//! use lutmap_core::format::{PixelFormat, SampleType};
//!
//! let rgb8 = PixelFormat::new(SampleType::U8, 3);
//! assert_eq!(rgb8.bytes_per_pixel(), 3);
//! assert!(!rgb8.sample_type.is_float());
//! ```

/// Runtime element type of raster samples and lookup table entries.
///
/// This is the closed set of encodings the lookup engine is instantiated
/// for. Each variant has a matching [`Sample`](crate::Sample) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleType {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 8-bit signed integer.
    I8,
    /// 16-bit unsigned integer.
    U16,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit single-precision float.
    F32,
    /// 64-bit double-precision float.
    F64,
}

impl SampleType {
    /// Number of bytes per sample.
    #[inline]
    pub const fn bytes(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Whether this is a floating-point type.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pixel layout of a raster: element type and number of bands.
///
/// A `PixelFormat` is a derived value. The lookup table recomputes the
/// destination format from the source format and its own element type
/// rather than storing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelFormat {
    /// Element type of every band.
    pub sample_type: SampleType,
    /// Number of bands (always >= 1 for a usable raster).
    pub bands: usize,
}

impl PixelFormat {
    /// Creates a pixel format.
    #[inline]
    pub const fn new(sample_type: SampleType, bands: usize) -> Self {
        Self { sample_type, bands }
    }

    /// Bytes occupied by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        self.sample_type.bytes() * self.bands
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.sample_type, self.bands)
    }
}
