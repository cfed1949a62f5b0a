//! Operator configuration.
//!
//! [`LookupParams`] collects everything besides the table itself: table
//! offsets, the ROI, no-data handling and an optional destination layout
//! hint. It is consumed once by [`LookupOp::new`](crate::LookupOp::new).
//!
//! ```rust
//! use lutmap_lut::{NoDataMode, NoDataRange};
//! use lutmap_ops::LookupParams;
//!
//! let params = LookupParams::new()
//!     .with_no_data(NoDataRange::point(-9999.0))
//!     .with_no_data_mode(NoDataMode::Sample)
//!     .with_destination_no_data(0.0);
//! assert!(params.excludes());
//! ```

use lutmap_core::PixelFormat;
use lutmap_lut::{NoData, NoDataMode, RoiMask};

/// Lookup operator parameters.
#[derive(Debug, Clone, Default)]
pub struct LookupParams {
    /// Domain minimum per table band, or one shared value. `None` means 0.
    pub offsets: Option<Vec<i64>>,
    /// Value written for pixels outside the ROI or flagged as no-data.
    pub destination_no_data: Option<f64>,
    /// Region of interest.
    pub roi: Option<RoiMask>,
    /// Source no-data description.
    pub no_data: Option<NoData>,
    /// Pixel- or sample-level no-data exclusion.
    pub no_data_mode: NoDataMode,
    /// Materialize the ROI per tile instead of probing it per pixel.
    pub use_roi_accessor: bool,
    /// Preferred destination layout, kept only if it matches the table.
    pub layout_hint: Option<PixelFormat>,
}

impl LookupParams {
    /// Parameters for a plain lookup: zero offset, no ROI, no no-data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same domain minimum for every table band.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offsets = Some(vec![offset]);
        self
    }

    /// One domain minimum per table band.
    pub fn with_offsets(mut self, offsets: Vec<i64>) -> Self {
        self.offsets = Some(offsets);
        self
    }

    /// Sets the destination no-data value.
    pub fn with_destination_no_data(mut self, value: f64) -> Self {
        self.destination_no_data = Some(value);
        self
    }

    /// Restricts the lookup to `roi`.
    pub fn with_roi(mut self, roi: RoiMask) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Excludes no-data source samples.
    pub fn with_no_data(mut self, no_data: impl Into<NoData>) -> Self {
        self.no_data = Some(no_data.into());
        self
    }

    /// Sets the no-data exclusion mode.
    pub fn with_no_data_mode(mut self, mode: NoDataMode) -> Self {
        self.no_data_mode = mode;
        self
    }

    /// Enables per-tile ROI materialization.
    pub fn with_roi_accessor(mut self, enabled: bool) -> Self {
        self.use_roi_accessor = enabled;
        self
    }

    /// Sets the destination layout hint.
    pub fn with_layout_hint(mut self, hint: PixelFormat) -> Self {
        self.layout_hint = Some(hint);
        self
    }

    /// `true` if an ROI or no-data is configured.
    pub fn excludes(&self) -> bool {
        self.roi.is_some() || self.no_data.is_some()
    }
}
