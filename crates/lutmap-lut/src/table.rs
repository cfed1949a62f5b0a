//! The lookup table: per-band output arrays plus ROI/no-data configuration.
//!
//! A [`LookupTable`] maps integer source samples to output values. Each
//! table band is a 1-D array addressed by `sample - offset`; samples outside
//! `[offset, offset + len - 1]` clamp to the nearest entry.
//!
//! Tables are built once per operation with [`LookupTableBuilder`] and are
//! immutable afterwards. Every tile computation borrows the same `&LookupTable`,
//! so concurrent tiles need no locking.
//!
//! # Example
//!
//! ```rust
//! use lutmap_core::{PixelFormat, SampleType};
//! use lutmap_lut::LookupTable;
//!
//! // Invert 8-bit samples into a float table
//! let inverted: Vec<f32> = (0..256).map(|v| 255.0 - v as f32).collect();
//! let table = LookupTable::new(inverted, PixelFormat::new(SampleType::U8, 3)).unwrap();
//!
//! assert_eq!(table.lookup(0, 0), 255.0);
//! assert_eq!(table.dest_format(), PixelFormat::new(SampleType::F32, 3));
//! ```

use lutmap_core::{PixelFormat, Sample, SampleType};
use tracing::debug;

use crate::negotiate::{dest_band_count, is_broadcast};
use crate::{LutError, LutResult, NoData, NoDataMode, NoDataRange, RoiMask};

/// Table entries for every band, one variant per sample type.
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    /// 8-bit unsigned entries.
    U8(Vec<Vec<u8>>),
    /// 8-bit signed entries.
    I8(Vec<Vec<i8>>),
    /// 16-bit unsigned entries.
    U16(Vec<Vec<u16>>),
    /// 16-bit signed entries.
    I16(Vec<Vec<i16>>),
    /// 32-bit signed entries.
    I32(Vec<Vec<i32>>),
    /// 32-bit float entries.
    F32(Vec<Vec<f32>>),
    /// 64-bit float entries.
    F64(Vec<Vec<f64>>),
}

/// Expands `$body` once per [`TableData`] variant with `$t` bound to the
/// band arrays.
macro_rules! dispatch_table {
    ($data:expr, $t:ident => $body:expr) => {
        match $data {
            TableData::U8($t) => $body,
            TableData::I8($t) => $body,
            TableData::U16($t) => $body,
            TableData::I16($t) => $body,
            TableData::I32($t) => $body,
            TableData::F32($t) => $body,
            TableData::F64($t) => $body,
        }
    };
}
pub(crate) use dispatch_table;

impl TableData {
    /// Element type of the entries.
    pub fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::I8(_) => SampleType::I8,
            Self::U16(_) => SampleType::U16,
            Self::I16(_) => SampleType::I16,
            Self::I32(_) => SampleType::I32,
            Self::F32(_) => SampleType::F32,
            Self::F64(_) => SampleType::F64,
        }
    }

    /// Number of bands.
    pub fn bands(&self) -> usize {
        dispatch_table!(self, t => t.len())
    }

    /// Number of entries in `band`.
    pub fn band_len(&self, band: usize) -> usize {
        dispatch_table!(self, t => t.get(band).map_or(0, Vec::len))
    }

    fn validate(&self) -> LutResult<()> {
        if self.bands() == 0 {
            return Err(LutError::InvalidSize("table must have at least one band".into()));
        }
        if let Some(b) = (0..self.bands()).find(|&b| self.band_len(b) == 0) {
            return Err(LutError::InvalidSize(format!("band {b} has no entries")));
        }
        Ok(())
    }
}

macro_rules! impl_table_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<Vec<$t>>> for TableData {
                fn from(bands: Vec<Vec<$t>>) -> Self {
                    Self::$variant(bands)
                }
            }

            impl From<Vec<$t>> for TableData {
                fn from(band: Vec<$t>) -> Self {
                    Self::$variant(vec![band])
                }
            }
        )*
    };
}

impl_table_from!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
);

/// ROI configuration captured by the table.
#[derive(Debug, Clone)]
pub struct RoiConfig {
    /// Shared mask.
    pub mask: RoiMask,
    /// Materialize a zero-extended mask tile per tile instead of probing
    /// the shared mask per pixel.
    pub use_accessor: bool,
}

/// No-data configuration captured by the table, expanded per source band.
#[derive(Debug, Clone)]
pub struct NoDataConfig {
    /// One range per source band.
    pub ranges: Vec<NoDataRange>,
    /// Pixel- or sample-level exclusion.
    pub mode: NoDataMode,
}

/// Immutable lookup table with its source format and exclusion settings.
#[derive(Debug, Clone)]
pub struct LookupTable {
    data: TableData,
    offsets: Vec<i64>,
    source: PixelFormat,
    dest_bands: usize,
    roi: Option<RoiConfig>,
    no_data: Option<NoDataConfig>,
    destination_no_data: Option<f64>,
}

impl LookupTable {
    /// Starts building a table for rasters of format `source`.
    pub fn builder(data: impl Into<TableData>, source: PixelFormat) -> LookupTableBuilder {
        LookupTableBuilder::new(data.into(), source)
    }

    /// Table with zero offset and no ROI or no-data.
    pub fn new(data: impl Into<TableData>, source: PixelFormat) -> LutResult<Self> {
        Self::builder(data, source).build()
    }

    /// Table entries.
    #[inline]
    pub fn data(&self) -> &TableData {
        &self.data
    }

    /// Element type of the table, and so of the destination.
    #[inline]
    pub fn sample_type(&self) -> SampleType {
        self.data.sample_type()
    }

    /// Number of table bands.
    #[inline]
    pub fn num_bands(&self) -> usize {
        self.data.bands()
    }

    /// The table's native format: table type and table band count.
    #[inline]
    pub fn table_format(&self) -> PixelFormat {
        PixelFormat::new(self.sample_type(), self.num_bands())
    }

    /// Source format the table was built for.
    #[inline]
    pub fn source_format(&self) -> PixelFormat {
        self.source
    }

    /// Destination band count, fixed at construction.
    #[inline]
    pub fn dest_bands(&self) -> usize {
        self.dest_bands
    }

    /// Destination format derived from the table and source formats.
    #[inline]
    pub fn dest_format(&self) -> PixelFormat {
        PixelFormat::new(self.sample_type(), self.dest_bands)
    }

    /// `true` if every destination band reads table band 0.
    #[inline]
    pub fn is_broadcast(&self) -> bool {
        is_broadcast(self.num_bands())
    }

    /// Offset (domain minimum) of `band`, clamped to the last band.
    #[inline]
    pub fn offset(&self, band: usize) -> i64 {
        self.offsets[band.min(self.offsets.len() - 1)]
    }

    /// Inclusive sample domain `(min, max)` of `band`, clamped to the last band.
    pub fn domain(&self, band: usize) -> (i64, i64) {
        let band = band.min(self.num_bands() - 1);
        let min = self.offset(band);
        (min, min + self.data.band_len(band) as i64 - 1)
    }

    /// ROI configuration, if any.
    #[inline]
    pub fn roi(&self) -> Option<&RoiConfig> {
        self.roi.as_ref()
    }

    /// No-data configuration, if any.
    #[inline]
    pub fn no_data(&self) -> Option<&NoDataConfig> {
        self.no_data.as_ref()
    }

    /// Destination no-data value; present iff ROI or no-data is configured.
    #[inline]
    pub fn destination_no_data(&self) -> Option<f64> {
        self.destination_no_data
    }

    /// `true` if neither ROI nor no-data is configured.
    #[inline]
    pub fn is_pass_through(&self) -> bool {
        self.roi.is_none() && self.no_data.is_none()
    }

    /// Table band read by destination band `dest_band`.
    #[inline]
    pub(crate) fn table_band(&self, dest_band: usize) -> usize {
        if self.is_broadcast() {
            0
        } else {
            dest_band.min(self.num_bands() - 1)
        }
    }

    /// Looks up `raw` in `band`, returning the entry widened to `f64`.
    ///
    /// `band` beyond the last table band reads the last band. `raw` outside
    /// the band's domain clamps to the nearest entry.
    pub fn lookup(&self, band: usize, raw: i64) -> f64 {
        let band = band.min(self.num_bands() - 1);
        let offset = self.offset(band);
        dispatch_table!(&self.data, t => entry(&t[band], raw, offset).to_f64())
    }
}

/// Clamped table access shared by the per-pixel primitive and the tile engine.
#[inline(always)]
pub(crate) fn entry<D: Sample>(band: &[D], raw: i64, offset: i64) -> D {
    let last = band.len() as i64 - 1;
    let idx = raw.saturating_sub(offset).clamp(0, last);
    band[idx as usize]
}

/// Builder for [`LookupTable`].
///
/// ROI, no-data and the destination no-data value are set here, before
/// the table exists, so a built table never changes.
#[derive(Debug, Clone)]
pub struct LookupTableBuilder {
    data: TableData,
    offsets: Vec<i64>,
    source: PixelFormat,
    roi: Option<RoiMask>,
    use_roi_accessor: bool,
    no_data: Option<NoData>,
    no_data_mode: NoDataMode,
    destination_no_data: Option<f64>,
}

impl LookupTableBuilder {
    fn new(data: TableData, source: PixelFormat) -> Self {
        Self {
            data,
            offsets: vec![0],
            source,
            roi: None,
            use_roi_accessor: false,
            no_data: None,
            no_data_mode: NoDataMode::default(),
            destination_no_data: None,
        }
    }

    /// Same domain minimum for every band.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offsets = vec![offset];
        self
    }

    /// One domain minimum per table band (or a single shared one).
    pub fn offsets(mut self, offsets: Vec<i64>) -> Self {
        self.offsets = offsets;
        self
    }

    /// Restricts the lookup to an ROI.
    pub fn roi(mut self, roi: RoiMask) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Sets an optional ROI.
    pub fn roi_opt(mut self, roi: Option<RoiMask>) -> Self {
        self.roi = roi;
        self
    }

    /// Chooses per-tile mask materialization over random probing.
    pub fn use_roi_accessor(mut self, enabled: bool) -> Self {
        self.use_roi_accessor = enabled;
        self
    }

    /// Excludes no-data source samples.
    pub fn no_data(mut self, no_data: impl Into<NoData>) -> Self {
        self.no_data = Some(no_data.into());
        self
    }

    /// Sets an optional no-data description.
    pub fn no_data_opt(mut self, no_data: Option<NoData>) -> Self {
        self.no_data = no_data;
        self
    }

    /// Pixel- or sample-level no-data exclusion.
    pub fn no_data_mode(mut self, mode: NoDataMode) -> Self {
        self.no_data_mode = mode;
        self
    }

    /// Value written for excluded pixels.
    pub fn destination_no_data(mut self, value: f64) -> Self {
        self.destination_no_data = Some(value);
        self
    }

    /// Sets an optional destination no-data value.
    pub fn destination_no_data_opt(mut self, value: Option<f64>) -> Self {
        self.destination_no_data = value;
        self
    }

    /// Validates the configuration and freezes it.
    ///
    /// # Errors
    ///
    /// - [`LutError::InvalidSize`] for an empty table or band
    /// - [`LutError::InvalidOffsets`] unless there is one offset or one per band
    /// - [`LutError::InvalidSource`] for a source without bands
    /// - [`LutError::NoDataBands`] for per-band no-data of the wrong length
    /// - [`LutError::MissingDestinationNoData`] if ROI or no-data is set
    ///   without a destination no-data value
    pub fn build(self) -> LutResult<LookupTable> {
        self.data.validate()?;
        let bands = self.data.bands();
        if self.offsets.len() != 1 && self.offsets.len() != bands {
            return Err(LutError::InvalidOffsets {
                bands,
                got: self.offsets.len(),
            });
        }
        if self.source.bands == 0 {
            return Err(LutError::InvalidSource(self.source));
        }
        if let Some(nd) = &self.no_data {
            nd.validate(self.source.bands)?;
        }

        let excludes = self.roi.is_some() || self.no_data.is_some();
        let destination_no_data = match (excludes, self.destination_no_data) {
            (true, None) => return Err(LutError::MissingDestinationNoData),
            (true, value) => value,
            (false, _) => None,
        };

        let offsets = if self.offsets.len() == bands {
            self.offsets
        } else {
            vec![self.offsets[0]; bands]
        };
        let dest_bands = dest_band_count(bands, self.source.bands);

        debug!(
            table = %PixelFormat::new(self.data.sample_type(), bands),
            source = %self.source,
            dest_bands,
            roi = self.roi.is_some(),
            no_data = self.no_data.is_some(),
            "Built lookup table"
        );

        let source_bands = self.source.bands;
        let source_type = self.source.sample_type;
        Ok(LookupTable {
            data: self.data,
            offsets,
            source: self.source,
            dest_bands,
            roi: self.roi.map(|mask| RoiConfig {
                mask,
                use_accessor: self.use_roi_accessor,
            }),
            no_data: self.no_data.map(|nd| NoDataConfig {
                ranges: nd
                    .expand(source_bands)
                    .into_iter()
                    .map(|r| r.narrowed_to(source_type))
                    .collect(),
                mode: self.no_data_mode,
            }),
            destination_no_data,
        })
    }
}
