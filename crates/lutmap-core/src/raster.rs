//! Raster buffers in absolute pixel coordinates.
//!
//! - [`Raster`] - Typed, pixel-interleaved buffer with its own bounds
//! - [`RasterBuf`] - Tagged variant over every supported [`SampleType`]
//!
//! # Memory Layout
//!
//! Samples are stored row-major, bands interleaved:
//!
//! ```text
//! [b0 b1 b2 b0 b1 b2 ...]  ← row bounds.y
//! [b0 b1 b2 b0 b1 b2 ...]  ← row bounds.y + 1
//! ```
//!
//! Coordinates passed to accessors are absolute: a raster with bounds
//! `Rect(64, 64, 64x64)` answers `get(64, 64, 0)` with its first sample.
//!
//! # Usage
//!
//! ```rust
//! use lutmap_core::{Raster, RasterBuf, Rect, SampleType};
//!
//! let mut tile: Raster<u8> = Raster::new(Rect::new(10, 10, 4, 4), 3).unwrap();
//! tile.set(11, 12, 2, 200);
//! assert_eq!(tile.get(11, 12, 2), 200);
//!
//! let buf = RasterBuf::from(tile);
//! assert_eq!(buf.sample_type(), SampleType::U8);
//! assert_eq!(buf.get_f64(11, 12, 2), 200.0);
//! ```

use crate::{Error, PixelFormat, Rect, Result, Sample, SampleType};

/// Typed raster: bounds, band count and interleaved samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: Sample> {
    bounds: Rect,
    bands: usize,
    data: Vec<T>,
}

impl<T: Sample> Raster<T> {
    /// Creates a zero-filled raster.
    pub fn new(bounds: Rect, bands: usize) -> Result<Self> {
        Self::filled(bounds, bands, T::default())
    }

    /// Creates a raster with every sample set to `value`.
    pub fn filled(bounds: Rect, bands: usize, value: T) -> Result<Self> {
        let len = sample_count(bounds, bands)?;
        Ok(Self {
            bounds,
            bands,
            data: vec![value; len],
        })
    }

    /// Wraps existing samples. `data.len()` must equal `width * height * bands`.
    pub fn from_vec(bounds: Rect, bands: usize, data: Vec<T>) -> Result<Self> {
        let expected = sample_count(bounds, bands)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            bounds,
            bands,
            data,
        })
    }

    /// Raster bounds in absolute coordinates.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of bands.
    #[inline]
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Element type and band count.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        PixelFormat::new(T::TYPE, self.bands)
    }

    /// All samples, row-major and band-interleaved.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to all samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Offset of the first sample of pixel (x, y).
    ///
    /// Panics in debug builds if the position is outside the bounds.
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(self.bounds.contains(x, y), "({x}, {y}) outside {}", self.bounds);
        let row = (y - self.bounds.y) as usize;
        let col = (x - self.bounds.x) as usize;
        (row * self.bounds.width as usize + col) * self.bands
    }

    /// Sample at (x, y) in `band`.
    #[inline]
    pub fn get(&self, x: u32, y: u32, band: usize) -> T {
        self.data[self.pixel_offset(x, y) + band]
    }

    /// Sample at (x, y) in `band`, or `None` outside the bounds.
    #[inline]
    pub fn try_get(&self, x: u32, y: u32, band: usize) -> Option<T> {
        if self.bounds.contains(x, y) && band < self.bands {
            Some(self.get(x, y, band))
        } else {
            None
        }
    }

    /// Writes the sample at (x, y) in `band`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, band: usize, value: T) {
        let offset = self.pixel_offset(x, y) + band;
        self.data[offset] = value;
    }

    /// All bands of pixel (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[T] {
        let start = self.pixel_offset(x, y);
        &self.data[start..start + self.bands]
    }

    /// All bands of pixel (x, y), mutable.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [T] {
        let start = self.pixel_offset(x, y);
        let bands = self.bands;
        &mut self.data[start..start + bands]
    }

    /// The samples of row `y` restricted to columns `x..x + width`.
    #[inline]
    pub fn row_span(&self, x: u32, y: u32, width: u32) -> &[T] {
        let start = self.pixel_offset(x, y);
        &self.data[start..start + width as usize * self.bands]
    }

    /// Mutable row span, see [`row_span`](Self::row_span).
    #[inline]
    pub fn row_span_mut(&mut self, x: u32, y: u32, width: u32) -> &mut [T] {
        let start = self.pixel_offset(x, y);
        let len = width as usize * self.bands;
        &mut self.data[start..start + len]
    }

    /// Copies `region` into a new raster with the same band count.
    pub fn sub_raster(&self, region: Rect) -> Result<Self> {
        if region.is_empty() || !self.bounds.contains_rect(&region) {
            return Err(Error::region_outside(region, self.bounds));
        }
        let mut data = Vec::with_capacity(region.area() as usize * self.bands);
        for y in region.y..region.bottom() {
            data.extend_from_slice(self.row_span(region.x, y, region.width));
        }
        Ok(Self {
            bounds: region,
            bands: self.bands,
            data,
        })
    }

    /// Copies the overlapping part of `other` into this raster.
    ///
    /// Returns the region that was copied, or `None` if the rasters don't
    /// overlap.
    pub fn copy_from(&mut self, other: &Raster<T>) -> Result<Option<Rect>> {
        if other.bands != self.bands {
            return Err(Error::band_mismatch(self.bands, other.bands));
        }
        let Some(overlap) = self.bounds.intersect(&other.bounds) else {
            return Ok(None);
        };
        for y in overlap.y..overlap.bottom() {
            let src = other.row_span(overlap.x, y, overlap.width);
            self.row_span_mut(overlap.x, y, overlap.width)
                .copy_from_slice(src);
        }
        Ok(Some(overlap))
    }
}

fn sample_count(bounds: Rect, bands: usize) -> Result<usize> {
    if bands == 0 {
        return Err(Error::invalid_dimensions(
            bounds.width,
            bounds.height,
            bands,
            "band count must be > 0",
        ));
    }
    if !bounds.fits_u32() {
        return Err(Error::invalid_dimensions(
            bounds.width,
            bounds.height,
            bands,
            "bounds exceed the u32 coordinate space",
        ));
    }
    (bounds.width as usize)
        .checked_mul(bounds.height as usize)
        .and_then(|v| v.checked_mul(bands))
        .ok_or_else(|| {
            Error::invalid_dimensions(bounds.width, bounds.height, bands, "sample count overflow")
        })
}

/// A raster whose sample type is known only at runtime.
///
/// One variant per [`SampleType`]. Code that needs the concrete type
/// uses [`dispatch_raster!`](crate::dispatch_raster) to expand a generic
/// body for every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterBuf {
    /// 8-bit unsigned samples.
    U8(Raster<u8>),
    /// 8-bit signed samples.
    I8(Raster<i8>),
    /// 16-bit unsigned samples.
    U16(Raster<u16>),
    /// 16-bit signed samples.
    I16(Raster<i16>),
    /// 32-bit signed samples.
    I32(Raster<i32>),
    /// 32-bit float samples.
    F32(Raster<f32>),
    /// 64-bit float samples.
    F64(Raster<f64>),
}

/// Expands `$body` once per [`RasterBuf`] variant with `$r` bound to the
/// inner [`Raster`].
///
/// ```
/// use lutmap_core::{dispatch_raster, RasterBuf, Raster, Rect};
///
/// let buf = RasterBuf::from(Raster::<i16>::new(Rect::from_size(2, 2), 1).unwrap());
/// let len = dispatch_raster!(&buf, r => r.data().len());
/// assert_eq!(len, 4);
/// ```
#[macro_export]
macro_rules! dispatch_raster {
    ($buf:expr, $r:ident => $body:expr) => {
        match $buf {
            $crate::RasterBuf::U8($r) => $body,
            $crate::RasterBuf::I8($r) => $body,
            $crate::RasterBuf::U16($r) => $body,
            $crate::RasterBuf::I16($r) => $body,
            $crate::RasterBuf::I32($r) => $body,
            $crate::RasterBuf::F32($r) => $body,
            $crate::RasterBuf::F64($r) => $body,
        }
    };
}

impl RasterBuf {
    /// Creates a zero-filled raster of the given format.
    pub fn new(format: PixelFormat, bounds: Rect) -> Result<Self> {
        let bands = format.bands;
        Ok(match format.sample_type {
            SampleType::U8 => Self::U8(Raster::new(bounds, bands)?),
            SampleType::I8 => Self::I8(Raster::new(bounds, bands)?),
            SampleType::U16 => Self::U16(Raster::new(bounds, bands)?),
            SampleType::I16 => Self::I16(Raster::new(bounds, bands)?),
            SampleType::I32 => Self::I32(Raster::new(bounds, bands)?),
            SampleType::F32 => Self::F32(Raster::new(bounds, bands)?),
            SampleType::F64 => Self::F64(Raster::new(bounds, bands)?),
        })
    }

    /// Runtime element type.
    pub fn sample_type(&self) -> SampleType {
        dispatch_raster!(self, r => r.format().sample_type)
    }

    /// Element type and band count.
    pub fn format(&self) -> PixelFormat {
        dispatch_raster!(self, r => r.format())
    }

    /// Number of bands.
    pub fn bands(&self) -> usize {
        dispatch_raster!(self, r => r.bands())
    }

    /// Raster bounds.
    pub fn bounds(&self) -> Rect {
        dispatch_raster!(self, r => r.bounds())
    }

    /// Sample at (x, y) in `band`, widened to `f64`.
    pub fn get_f64(&self, x: u32, y: u32, band: usize) -> f64 {
        dispatch_raster!(self, r => r.get(x, y, band).to_f64())
    }

    /// Copies `region` into a new raster of the same type.
    pub fn sub_raster(&self, region: Rect) -> Result<Self> {
        Ok(dispatch_raster!(self, r => r.sub_raster(region)?.into()))
    }

    /// Copies the overlapping part of `other`; both must share a sample type.
    pub fn copy_from(&mut self, other: &RasterBuf) -> Result<Option<Rect>> {
        match (self, other) {
            (Self::U8(d), Self::U8(s)) => d.copy_from(s),
            (Self::I8(d), Self::I8(s)) => d.copy_from(s),
            (Self::U16(d), Self::U16(s)) => d.copy_from(s),
            (Self::I16(d), Self::I16(s)) => d.copy_from(s),
            (Self::I32(d), Self::I32(s)) => d.copy_from(s),
            (Self::F32(d), Self::F32(s)) => d.copy_from(s),
            (Self::F64(d), Self::F64(s)) => d.copy_from(s),
            (d, s) => Err(Error::sample_type_mismatch(d.sample_type(), s.sample_type())),
        }
    }

    /// Borrows the inner raster if it holds `T` samples.
    pub fn as_raster<T: Sample>(&self) -> Option<&Raster<T>> {
        let any: &dyn std::any::Any = dispatch_raster!(self, r => r);
        any.downcast_ref::<Raster<T>>()
    }
}

macro_rules! impl_from_raster {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Raster<$t>> for RasterBuf {
                fn from(raster: Raster<$t>) -> Self {
                    Self::$variant(raster)
                }
            }
        )*
    };
}

impl_from_raster!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
);
