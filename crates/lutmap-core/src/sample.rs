//! The [`Sample`] trait: primitive element types a raster band can hold.
//!
//! The trait ties a Rust primitive to its runtime [`SampleType`] tag and
//! provides the three conversions the lookup engine needs:
//!
//! - [`Sample::to_f64`] for range tests (no-data membership)
//! - [`Sample::from_f64`] for writing a configured numeric value in the
//!   element type (saturating, NaN becomes zero for integers)
//! - [`Sample::to_index`] for addressing a lookup array
//!
//! ```
//! use lutmap_core::Sample;
//!
//! assert_eq!(u8::from_f64(300.0), 255);
//! assert_eq!(i16::from_f64(-7.9), -7);
//! assert_eq!((-1.5f32).to_index(), -2);
//! ```

use crate::SampleType;

/// A primitive numeric type usable as a raster sample or table entry.
pub trait Sample: Copy + PartialEq + Default + Send + Sync + std::fmt::Debug + 'static {
    /// Runtime tag of this type.
    const TYPE: SampleType;

    /// Widens the sample to `f64`. Exact for every supported type.
    fn to_f64(self) -> f64;

    /// Narrows an `f64` to this type with Rust's saturating `as` semantics.
    fn from_f64(v: f64) -> Self;

    /// Integer position used to address a lookup array.
    ///
    /// Floating-point samples are floored; NaN maps to `i64::MIN` so that
    /// it clamps to the bottom of any table domain.
    fn to_index(self) -> i64;
}

macro_rules! impl_int_sample {
    ($($t:ty => $tag:ident),* $(,)?) => {
        $(
            impl Sample for $t {
                const TYPE: SampleType = SampleType::$tag;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn to_index(self) -> i64 {
                    self as i64
                }
            }
        )*
    };
}

impl_int_sample!(u8 => U8, i8 => I8, u16 => U16, i16 => I16, i32 => I32);

impl Sample for f32 {
    const TYPE: SampleType = SampleType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_index(self) -> i64 {
        if self.is_nan() {
            i64::MIN
        } else {
            self.floor() as i64
        }
    }
}

impl Sample for f64 {
    const TYPE: SampleType = SampleType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_index(self) -> i64 {
        if self.is_nan() {
            i64::MIN
        } else {
            self.floor() as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags() {
        assert_eq!(<u8 as Sample>::TYPE, SampleType::U8);
        assert_eq!(<i8 as Sample>::TYPE, SampleType::I8);
        assert_eq!(<i32 as Sample>::TYPE, SampleType::I32);
        assert_eq!(<f64 as Sample>::TYPE, SampleType::F64);
    }

    #[test]
    fn test_from_f64_saturates() {
        assert_eq!(u8::from_f64(-1.0), 0);
        assert_eq!(u8::from_f64(1e9), 255);
        assert_eq!(i8::from_f64(-200.0), -128);
        assert_eq!(u16::from_f64(f64::NAN), 0);
        assert_eq!(i32::from_f64(12.75), 12);
    }

    #[test]
    fn test_to_index() {
        assert_eq!(200u8.to_index(), 200);
        assert_eq!((-5i8).to_index(), -5);
        assert_eq!(2.99f32.to_index(), 2);
        assert_eq!((-0.5f64).to_index(), -1);
        assert_eq!(f32::NAN.to_index(), i64::MIN);
    }

    #[test]
    fn test_to_f64() {
        approx::assert_relative_eq!(0.25f32.to_f64(), 0.25);
        assert_eq!(65535u16.to_f64(), 65535.0);
    }
}
