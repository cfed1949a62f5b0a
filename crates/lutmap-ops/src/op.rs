//! The lookup operator.
//!
//! [`LookupOp`] owns a built [`LookupTable`] plus the negotiated destination
//! format. It is the unit a host scheduler works with: tiles are computed
//! through the [`TileTransform`] trait, indexed rasters go through the
//! palette path instead.

use lutmap_core::{Colormap, PixelFormat, Raster, RasterBuf, Rect};
use lutmap_lut::{LookupTable, TableData, negotiate};
use tracing::debug;

use crate::{LookupParams, OpsResult};

/// Computes destination tiles from source tiles.
///
/// Implementors are shared by reference between worker threads, so
/// `compute_tile` takes `&self`.
pub trait TileTransform: Send + Sync {
    /// Format of every destination tile.
    fn dest_format(&self) -> PixelFormat;

    /// Writes `dest_rect` of `dst` from `src`.
    ///
    /// `src` must cover `dest_rect`; its own bounds are the source tile
    /// bounds.
    fn compute_tile(&self, src: &RasterBuf, dst: &mut RasterBuf, dest_rect: Rect) -> OpsResult<()>;
}

/// Lookup-table operator.
#[derive(Debug, Clone)]
pub struct LookupOp {
    table: LookupTable,
    dest_format: PixelFormat,
}

impl LookupOp {
    /// Builds the table for `source` rasters and negotiates the destination.
    ///
    /// # Errors
    ///
    /// Any table construction error, notably
    /// [`LutError::MissingDestinationNoData`](lutmap_lut::LutError::MissingDestinationNoData)
    /// when `params` has an ROI or no-data but no destination no-data value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lutmap_core::{PixelFormat, SampleType};
    /// use lutmap_ops::{LookupOp, LookupParams, TileTransform};
    ///
    /// let table: Vec<u16> = (0..256).map(|v| v * 4).collect();
    /// let op = LookupOp::new(table, PixelFormat::new(SampleType::U8, 3), LookupParams::new()).unwrap();
    /// assert_eq!(op.dest_format(), PixelFormat::new(SampleType::U16, 3));
    /// ```
    pub fn new(
        table: impl Into<TableData>,
        source: PixelFormat,
        params: LookupParams,
    ) -> OpsResult<Self> {
        let LookupParams {
            offsets,
            destination_no_data,
            roi,
            no_data,
            no_data_mode,
            use_roi_accessor,
            layout_hint,
        } = params;

        let mut builder = LookupTable::builder(table, source)
            .roi_opt(roi)
            .use_roi_accessor(use_roi_accessor)
            .no_data_opt(no_data)
            .no_data_mode(no_data_mode)
            .destination_no_data_opt(destination_no_data);
        if let Some(offsets) = offsets {
            builder = builder.offsets(offsets);
        }
        let table = builder.build()?;

        let dest_format = negotiate(source, table.table_format(), layout_hint);
        debug!(
            source = %source,
            table = %table.table_format(),
            dest = %dest_format,
            "Created lookup operator"
        );
        Ok(Self { table, dest_format })
    }

    /// The underlying table.
    #[inline]
    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// Source format the operator accepts.
    #[inline]
    pub fn source_format(&self) -> PixelFormat {
        self.table.source_format()
    }

    /// Remaps a palette in place.
    pub fn transform_colormap(&self, colormap: &mut Colormap) {
        self.table.transform_colormap(colormap);
    }

    /// Recolors an indexed raster by transforming its palette.
    ///
    /// The index raster is shared with the input unchanged.
    pub fn apply_indexed(&self, image: &IndexedImage) -> IndexedImage {
        let mut colormap = image.colormap.clone();
        self.transform_colormap(&mut colormap);
        IndexedImage {
            indices: image.indices.clone(),
            colormap,
        }
    }
}

impl TileTransform for LookupOp {
    fn dest_format(&self) -> PixelFormat {
        self.dest_format
    }

    fn compute_tile(&self, src: &RasterBuf, dst: &mut RasterBuf, dest_rect: Rect) -> OpsResult<()> {
        let roi_tile = match self.table.roi() {
            Some(roi) if roi.use_accessor => Some(roi.mask.extended(src.bounds())?),
            _ => None,
        };
        self.table.lookup_tile(src, dst, dest_rect, roi_tile.as_ref())?;
        Ok(())
    }
}

/// Single-band index raster plus its palette.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    /// Palette indices, one band.
    pub indices: Raster<u8>,
    /// Palette.
    pub colormap: Colormap,
}

impl IndexedImage {
    /// Pairs indices with a palette.
    ///
    /// # Errors
    ///
    /// Fails if `indices` has more than one band.
    pub fn new(indices: Raster<u8>, colormap: Colormap) -> OpsResult<Self> {
        if indices.bands() != 1 {
            return Err(lutmap_core::Error::band_mismatch(1, indices.bands()).into());
        }
        Ok(Self { indices, colormap })
    }

    /// Expands to a 3-band RGB raster.
    pub fn to_rgb(&self) -> OpsResult<Raster<u8>> {
        Ok(self.colormap.expand(&self.indices)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutmap_core::SampleType;
    use lutmap_lut::{LutError, NoDataRange, RoiMask};

    fn gray(bands: usize) -> PixelFormat {
        PixelFormat::new(SampleType::U8, bands)
    }

    #[test]
    fn test_missing_destination_no_data_fails_fast() {
        let params = LookupParams::new().with_no_data(NoDataRange::point(0.0));
        let err = LookupOp::new(vec![0u8; 256], gray(1), params).unwrap_err();
        assert!(matches!(err, crate::OpsError::Lut(LutError::MissingDestinationNoData)));
    }

    #[test]
    fn test_incompatible_hint_ignored() {
        let params = LookupParams::new().with_layout_hint(PixelFormat::new(SampleType::F64, 1));
        let op = LookupOp::new(vec![0i16; 256], gray(2), params).unwrap();
        assert_eq!(op.dest_format(), PixelFormat::new(SampleType::I16, 2));
        assert_eq!(op.dest_format(), op.table().dest_format());
    }

    #[test]
    fn test_offsets_forwarded() {
        let params = LookupParams::new().with_offset(-128);
        let op = LookupOp::new(vec![0u8; 256], PixelFormat::new(SampleType::I8, 1), params).unwrap();
        assert_eq!(op.table().domain(0), (-128, 127));
    }

    #[test]
    fn test_accessor_extends_over_source_tile() {
        let bounds = Rect::from_size(6, 6);
        let roi = RoiMask::from_rect(Rect::new(0, 0, 3, 3)).unwrap();
        let params = LookupParams::new()
            .with_roi(roi)
            .with_roi_accessor(true)
            .with_destination_no_data(9.0);
        let op = LookupOp::new((0..=255u8).collect::<Vec<_>>(), gray(1), params).unwrap();

        let src: RasterBuf = Raster::filled(bounds, 1, 4u8).unwrap().into();
        let mut dst = RasterBuf::new(op.dest_format(), bounds).unwrap();
        op.compute_tile(&src, &mut dst, Rect::new(2, 2, 4, 4)).unwrap();
        assert_eq!(dst.get_f64(2, 2, 0), 4.0);
        assert_eq!(dst.get_f64(3, 2, 0), 9.0);
        assert_eq!(dst.get_f64(0, 0, 0), 0.0);
    }

    #[test]
    fn test_apply_indexed_keeps_indices() {
        let indices = Raster::from_vec(Rect::from_size(2, 1), 1, vec![0u8, 1]).unwrap();
        let cmap = Colormap::from_rgb(&[[10, 20, 30], [40, 50, 60]]).unwrap();
        let image = IndexedImage::new(indices, cmap).unwrap();

        let inverted: Vec<u8> = (0..=255u8).rev().collect();
        let op = LookupOp::new(inverted, gray(1), LookupParams::new()).unwrap();
        let out = op.apply_indexed(&image);
        assert_eq!(out.indices, image.indices);
        assert_eq!(out.colormap.entry(1), Some([215, 205, 195]));

        let rgb = out.to_rgb().unwrap();
        assert_eq!(rgb.pixel(0, 0), &[245, 235, 225]);
    }

    #[test]
    fn test_indexed_rejects_multiband() {
        let indices = Raster::<u8>::new(Rect::from_size(2, 2), 3).unwrap();
        let cmap = Colormap::gray_ramp(2).unwrap();
        assert!(IndexedImage::new(indices, cmap).is_err());
    }
}
