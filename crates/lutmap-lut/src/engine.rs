//! Tile lookup engine.
//!
//! [`LookupTable::lookup_tile`] remaps one destination rectangle. The
//! runtime sample types of the source raster and the table are resolved once
//! per tile; the pixel loop itself is instantiated per (source type, table
//! type, mask probe, no-data test) combination, so the per-pixel work is a
//! handful of inlined comparisons and one array read.
//!
//! With neither ROI nor no-data configured the loop is an unconditional
//! lookup and the destination no-data value is never written.

use lutmap_core::{Raster, RasterBuf, Rect, Sample, dispatch_raster};
use tracing::trace;

use crate::roi::{ExtendedTile, MaskProbe, NoMask, RandomProbe};
use crate::table::{TableData, entry};
use crate::{LookupTable, LutError, LutResult, NoDataMode, NoDataRange};

impl LookupTable {
    /// Looks up every pixel of `dest_rect` from `src` into `dst`.
    ///
    /// `roi_tile` is an optional pre-fetched mask tile (zero outside the
    /// ROI). When it is `None` and an ROI is configured, the mask is either
    /// materialized for `dest_rect` (accessor mode) or probed directly.
    ///
    /// Only `dst` samples inside `dest_rect` are written.
    ///
    /// # Errors
    ///
    /// [`LutError::TileFormat`] if `src` doesn't have the table's source
    /// format or `dst` the destination format; [`LutError::TileBounds`] if
    /// either raster doesn't cover `dest_rect`. Both are checked before any
    /// sample is written.
    pub fn lookup_tile(
        &self,
        src: &RasterBuf,
        dst: &mut RasterBuf,
        dest_rect: Rect,
        roi_tile: Option<&Raster<u8>>,
    ) -> LutResult<()> {
        self.check_tile(src, dst, dest_rect)?;
        if dest_rect.is_empty() {
            return Ok(());
        }
        trace!(rect = %dest_rect, pass_through = self.is_pass_through(), "lookup_tile");

        match (self.data(), dst) {
            (TableData::U8(t), RasterBuf::U8(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (TableData::I8(t), RasterBuf::I8(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (TableData::U16(t), RasterBuf::U16(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (TableData::I16(t), RasterBuf::I16(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (TableData::I32(t), RasterBuf::I32(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (TableData::F32(t), RasterBuf::F32(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (TableData::F64(t), RasterBuf::F64(d)) => self.lookup_from(src, t, d, dest_rect, roi_tile),
            (_, d) => Err(LutError::TileFormat {
                expected: self.dest_format(),
                got: d.format(),
            }),
        }
    }

    fn check_tile(&self, src: &RasterBuf, dst: &RasterBuf, rect: Rect) -> LutResult<()> {
        if src.format() != self.source_format() {
            return Err(LutError::TileFormat {
                expected: self.source_format(),
                got: src.format(),
            });
        }
        if dst.format() != self.dest_format() {
            return Err(LutError::TileFormat {
                expected: self.dest_format(),
                got: dst.format(),
            });
        }
        for (which, bounds) in [("source", src.bounds()), ("destination", dst.bounds())] {
            if !bounds.contains_rect(&rect) {
                return Err(LutError::TileBounds {
                    rect,
                    which,
                    bounds,
                });
            }
        }
        Ok(())
    }

    fn lookup_from<D: Sample>(
        &self,
        src: &RasterBuf,
        table: &[Vec<D>],
        dst: &mut Raster<D>,
        rect: Rect,
        roi_tile: Option<&Raster<u8>>,
    ) -> LutResult<()> {
        dispatch_raster!(src, s => self.lookup_typed(s, table, dst, rect, roi_tile))
    }

    fn lookup_typed<S: Sample, D: Sample>(
        &self,
        src: &Raster<S>,
        table: &[Vec<D>],
        dst: &mut Raster<D>,
        rect: Rect,
        roi_tile: Option<&Raster<u8>>,
    ) -> LutResult<()> {
        let kernel = Kernel::new(self, table, src.bands());
        if self.is_pass_through() {
            kernel.run_unmasked(src, dst, rect);
            return Ok(());
        }

        match (self.roi(), roi_tile) {
            (None, _) => self.run_masked(&kernel, src, dst, rect, NoMask),
            (Some(_), Some(tile)) => self.run_masked(&kernel, src, dst, rect, ExtendedTile(tile)),
            (Some(roi), None) if roi.use_accessor => {
                let tile = roi.mask.extended(rect)?;
                self.run_masked(&kernel, src, dst, rect, ExtendedTile(&tile));
            }
            (Some(roi), None) => self.run_masked(&kernel, src, dst, rect, RandomProbe(&roi.mask)),
        }
        Ok(())
    }

    fn run_masked<S: Sample, D: Sample, M: MaskProbe>(
        &self,
        kernel: &Kernel<'_, D>,
        src: &Raster<S>,
        dst: &mut Raster<D>,
        rect: Rect,
        mask: M,
    ) {
        match self.no_data() {
            None => kernel.run(src, dst, rect, &mask, &NoCheck),
            Some(nd) => match nd.mode {
                NoDataMode::Pixel => kernel.run(src, dst, rect, &mask, &PixelCheck(&nd.ranges)),
                NoDataMode::Sample => kernel.run(src, dst, rect, &mask, &SampleCheck(&nd.ranges)),
            },
        }
    }
}

/// Source band, table band and offset feeding one destination band.
struct Lane<'a, D> {
    source_band: usize,
    band: &'a [D],
    offset: i64,
}

/// Per-tile lookup state: one lane per destination band.
struct Kernel<'a, D> {
    lanes: Vec<Lane<'a, D>>,
    no_data: D,
}

impl<'a, D: Sample> Kernel<'a, D> {
    fn new(table: &LookupTable, bands: &'a [Vec<D>], source_bands: usize) -> Self {
        let lanes = (0..table.dest_bands())
            .map(|b| {
                let tb = table.table_band(b);
                Lane {
                    source_band: b.min(source_bands - 1),
                    band: &bands[tb],
                    offset: table.offset(tb),
                }
            })
            .collect();
        Self {
            lanes,
            no_data: D::from_f64(table.destination_no_data().unwrap_or(0.0)),
        }
    }

    fn run_unmasked<S: Sample>(&self, src: &Raster<S>, dst: &mut Raster<D>, rect: Rect) {
        let (sb, db) = (src.bands(), dst.bands());
        for y in rect.y..rect.bottom() {
            let src_row = src.row_span(rect.x, y, rect.width);
            let dst_row = dst.row_span_mut(rect.x, y, rect.width);
            for (s_px, d_px) in src_row.chunks_exact(sb).zip(dst_row.chunks_exact_mut(db)) {
                for (out, lane) in d_px.iter_mut().zip(&self.lanes) {
                    *out = entry(lane.band, s_px[lane.source_band].to_index(), lane.offset);
                }
            }
        }
    }

    fn run<S: Sample, M: MaskProbe, N: NoDataCheck>(
        &self,
        src: &Raster<S>,
        dst: &mut Raster<D>,
        rect: Rect,
        mask: &M,
        check: &N,
    ) {
        let (sb, db) = (src.bands(), dst.bands());
        for y in rect.y..rect.bottom() {
            let src_row = src.row_span(rect.x, y, rect.width);
            let dst_row = dst.row_span_mut(rect.x, y, rect.width);
            let pixels = src_row.chunks_exact(sb).zip(dst_row.chunks_exact_mut(db));
            for (x, (s_px, d_px)) in (rect.x..).zip(pixels) {
                if !mask.inside(x, y) || check.pixel_excluded(s_px) {
                    d_px.fill(self.no_data);
                    continue;
                }
                for (out, lane) in d_px.iter_mut().zip(&self.lanes) {
                    let v = s_px[lane.source_band];
                    *out = if check.sample_excluded(lane.source_band, v) {
                        self.no_data
                    } else {
                        entry(lane.band, v.to_index(), lane.offset)
                    };
                }
            }
        }
    }
}

/// No-data test, resolved statically per tile.
trait NoDataCheck {
    /// `true` if the whole pixel is excluded.
    fn pixel_excluded<S: Sample>(&self, px: &[S]) -> bool;
    /// `true` if the sample of `band` alone is excluded.
    fn sample_excluded<S: Sample>(&self, band: usize, v: S) -> bool;
}

struct NoCheck;

impl NoDataCheck for NoCheck {
    #[inline(always)]
    fn pixel_excluded<S: Sample>(&self, _px: &[S]) -> bool {
        false
    }

    #[inline(always)]
    fn sample_excluded<S: Sample>(&self, _band: usize, _v: S) -> bool {
        false
    }
}

struct PixelCheck<'a>(&'a [NoDataRange]);

impl NoDataCheck for PixelCheck<'_> {
    #[inline(always)]
    fn pixel_excluded<S: Sample>(&self, px: &[S]) -> bool {
        px.iter().zip(self.0).any(|(v, r)| r.contains(v.to_f64()))
    }

    #[inline(always)]
    fn sample_excluded<S: Sample>(&self, _band: usize, _v: S) -> bool {
        false
    }
}

struct SampleCheck<'a>(&'a [NoDataRange]);

impl NoDataCheck for SampleCheck<'_> {
    #[inline(always)]
    fn pixel_excluded<S: Sample>(&self, _px: &[S]) -> bool {
        false
    }

    #[inline(always)]
    fn sample_excluded<S: Sample>(&self, band: usize, v: S) -> bool {
        self.0[band].contains(v.to_f64())
    }
}
