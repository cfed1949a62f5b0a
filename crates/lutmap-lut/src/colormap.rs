//! Colormap transform.
//!
//! Indexed-color rasters are remapped by rewriting their palette instead of
//! their pixels. Each of the three palette channels is passed through the
//! table, then clamped back into a byte.
//!
//! A palette entry has no pixel position, so ROI and no-data settings are
//! not consulted here.

use lutmap_core::Colormap;

use crate::LookupTable;

impl LookupTable {
    /// Table band used for palette channel `channel` (0 = red, 1 = green, 2 = blue).
    #[inline]
    pub fn colormap_band(&self, channel: usize) -> usize {
        if self.is_broadcast() { 0 } else { channel }
    }

    /// Remaps every palette entry in place.
    ///
    /// Results are truncated toward zero and clamped to `0..=255`; NaN
    /// table entries become 0.
    pub fn transform_colormap(&self, colormap: &mut Colormap) {
        for (channel, values) in colormap.channels_mut().into_iter().enumerate() {
            let band = self.colormap_band(channel);
            for v in values.iter_mut() {
                *v = clamp_byte(self.lookup(band, *v as i64));
            }
        }
    }
}

#[inline]
fn clamp_byte(v: f64) -> u8 {
    (v as i64).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutmap_core::{PixelFormat, SampleType};

    #[test]
    fn test_clamp_byte() {
        assert_eq!(clamp_byte(-3.0), 0);
        assert_eq!(clamp_byte(254.9), 254);
        assert_eq!(clamp_byte(1e12), 255);
        assert_eq!(clamp_byte(f64::NAN), 0);
    }

    #[test]
    fn test_broadcast_table_on_palette() {
        let table = LookupTable::new(
            (0..256).map(|v| v as i32 * 2).collect::<Vec<_>>(),
            PixelFormat::new(SampleType::U8, 1),
        )
        .unwrap();
        let mut cmap = Colormap::from_rgb(&[[1, 2, 3], [100, 127, 200]]).unwrap();
        table.transform_colormap(&mut cmap);
        assert_eq!(cmap.entry(0), Some([2, 4, 6]));
        assert_eq!(cmap.entry(1), Some([200, 254, 255]));
    }

    #[test]
    fn test_per_channel_table_on_palette() {
        let table = LookupTable::new(
            vec![vec![0.0f32; 256], vec![128.0f32; 256], vec![-5.0f32; 256]],
            PixelFormat::new(SampleType::U8, 3),
        )
        .unwrap();
        let mut cmap = Colormap::gray_ramp(4).unwrap();
        table.transform_colormap(&mut cmap);
        for i in 0..4 {
            assert_eq!(cmap.entry(i), Some([0, 128, 0]));
        }
    }
}
