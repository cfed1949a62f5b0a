//! No-data ranges.
//!
//! A no-data range marks sentinel sample values that must not be looked up.
//! Bounds are `f64` so one range type covers every sample type; integer
//! samples widen exactly. For `f32` sources the bounds are rounded to `f32`
//! when the table is built, so `point(0.1)` matches a `0.1f32` sample.
//!
//! # Example
//!
//! ```rust
//! use lutmap_lut::{NoData, NoDataRange};
//!
//! let fill = NoDataRange::point(200.0);
//! assert!(fill.contains(200.0));
//! assert!(!fill.contains(199.0));
//!
//! // -9999 and NaN are both no-data in every band
//! let nodata = NoData::Global(NoDataRange::point(-9999.0).with_nan(true));
//! assert!(nodata.range(2).is_some_and(|r| r.contains(f64::NAN)));
//! ```

use lutmap_core::SampleType;

use crate::{LutError, LutResult};

/// A closed, open or half-open interval of sample values, optionally
/// including NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoDataRange {
    min: f64,
    max: f64,
    min_included: bool,
    max_included: bool,
    nan_included: bool,
}

impl NoDataRange {
    /// Inclusive range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Fails if either bound is NaN or `min > max`.
    pub fn new(min: f64, max: f64) -> LutResult<Self> {
        Self::with_bounds(min, true, max, true)
    }

    /// Range with explicit inclusiveness of each bound.
    pub fn with_bounds(
        min: f64,
        min_included: bool,
        max: f64,
        max_included: bool,
    ) -> LutResult<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(LutError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            min_included,
            max_included,
            nan_included: false,
        })
    }

    /// Single value `[v, v]`. A NaN value yields the NaN-only range.
    pub fn point(v: f64) -> Self {
        if v.is_nan() {
            return Self::nan();
        }
        Self {
            min: v,
            max: v,
            min_included: true,
            max_included: true,
            nan_included: false,
        }
    }

    /// Range matching only NaN samples.
    pub fn nan() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            min_included: false,
            max_included: false,
            nan_included: true,
        }
    }

    /// Sets whether NaN samples belong to the range.
    pub fn with_nan(mut self, nan_included: bool) -> Self {
        self.nan_included = nan_included;
        self
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Rounds the bounds to the precision of `sample_type`.
    pub(crate) fn narrowed_to(self, sample_type: SampleType) -> Self {
        match sample_type {
            SampleType::F32 => Self {
                min: self.min as f32 as f64,
                max: self.max as f32 as f64,
                ..self
            },
            _ => self,
        }
    }

    /// Returns `true` if `v` lies in the range.
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        if v.is_nan() {
            return self.nan_included;
        }
        let above = if self.min_included { v >= self.min } else { v > self.min };
        let below = if self.max_included { v <= self.max } else { v < self.max };
        above && below
    }
}

/// No-data description for a source raster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoData {
    /// One range shared by every source band.
    Global(NoDataRange),
    /// One range per source band.
    PerBand(Vec<NoDataRange>),
}

impl NoData {
    /// Range that applies to source band `band`.
    ///
    /// Bands past the end of a per-band list read its last range. An empty
    /// per-band list has no range for any band.
    #[inline]
    pub fn range(&self, band: usize) -> Option<&NoDataRange> {
        match self {
            Self::Global(r) => Some(r),
            Self::PerBand(ranges) => ranges.get(band).or_else(|| ranges.last()),
        }
    }

    pub(crate) fn validate(&self, source_bands: usize) -> LutResult<()> {
        match self {
            Self::Global(_) => Ok(()),
            Self::PerBand(ranges) if ranges.len() == source_bands && !ranges.is_empty() => Ok(()),
            Self::PerBand(ranges) => Err(LutError::NoDataBands {
                source_bands,
                ranges: ranges.len(),
            }),
        }
    }

    /// Expands to one range per source band.
    pub(crate) fn expand(&self, source_bands: usize) -> Vec<NoDataRange> {
        (0..source_bands).filter_map(|b| self.range(b).copied()).collect()
    }
}

impl From<NoDataRange> for NoData {
    fn from(range: NoDataRange) -> Self {
        Self::Global(range)
    }
}

/// How no-data samples exclude destination values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoDataMode {
    /// A pixel is no-data if any of its source samples is; every
    /// destination band of that pixel receives the destination no-data value.
    #[default]
    Pixel,
    /// Each destination band is tested against its own source sample only.
    Sample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_range() {
        let r = NoDataRange::point(200.0);
        assert!(r.contains(200.0));
        assert!(!r.contains(200.5));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn test_open_bounds() {
        let r = NoDataRange::with_bounds(0.0, false, 10.0, true).unwrap();
        assert!(!r.contains(0.0));
        assert!(r.contains(0.001));
        assert!(r.contains(10.0));
        assert!(!r.contains(10.001));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(NoDataRange::new(5.0, 1.0).is_err());
        assert!(NoDataRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_nan_range() {
        let r = NoDataRange::nan();
        assert!(r.contains(f64::NAN));
        assert!(!r.contains(0.0));
        assert!(!r.contains(f64::INFINITY));
        assert_eq!(NoDataRange::point(f64::NAN), r);
    }

    #[test]
    fn test_per_band_validation() {
        let nd = NoData::PerBand(vec![NoDataRange::point(0.0), NoDataRange::point(1.0)]);
        assert!(nd.validate(2).is_ok());
        assert!(matches!(
            nd.validate(3),
            Err(LutError::NoDataBands { source_bands: 3, ranges: 2 })
        ));
        assert!(NoData::Global(NoDataRange::point(0.0)).validate(7).is_ok());
    }

    #[test]
    fn test_range_lookup() {
        let nd = NoData::PerBand(vec![NoDataRange::point(1.0), NoDataRange::point(2.0)]);
        assert_eq!(nd.range(0), Some(&NoDataRange::point(1.0)));
        assert_eq!(nd.range(5), Some(&NoDataRange::point(2.0)));

        let empty = NoData::PerBand(vec![]);
        assert_eq!(empty.range(0), None);
        assert!(empty.validate(1).is_err());
        assert!(empty.expand(3).is_empty());
    }

    #[test]
    fn test_narrowed_to_f32() {
        let r = NoDataRange::point(0.1);
        assert!(!r.contains(0.1f32 as f64));
        let narrowed = r.narrowed_to(SampleType::F32);
        assert!(narrowed.contains(0.1f32 as f64));
        assert_eq!(r.narrowed_to(SampleType::F64), r);
        assert_eq!(NoDataRange::nan().narrowed_to(SampleType::F32), NoDataRange::nan());
    }

    #[test]
    fn test_expand() {
        let nd = NoData::from(NoDataRange::point(3.0));
        let ranges = nd.expand(3);
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(|r| r.contains(3.0)));
    }
}
