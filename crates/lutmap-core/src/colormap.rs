//! Colormap - palette for indexed-color rasters.
//!
//! An indexed raster stores one byte per pixel; the colormap turns each
//! index into an RGB triple. Channels are kept as separate arrays so that a
//! per-channel transform can rewrite them in place.

use crate::{Error, Raster, Result};

/// Largest number of entries an 8-bit index can address.
pub const MAX_COLORMAP_ENTRIES: usize = 256;

/// RGB palette with one byte array per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    channels: [Vec<u8>; 3],
}

impl Colormap {
    /// Creates a colormap from red, green and blue arrays of equal length.
    pub fn new(red: Vec<u8>, green: Vec<u8>, blue: Vec<u8>) -> Result<Self> {
        let len = red.len();
        if len == 0 || len > MAX_COLORMAP_ENTRIES {
            return Err(Error::InvalidColormap(format!(
                "entry count {len} not in 1..={MAX_COLORMAP_ENTRIES}"
            )));
        }
        if green.len() != len || blue.len() != len {
            return Err(Error::InvalidColormap(format!(
                "channel lengths differ: {len}/{}/{}",
                green.len(),
                blue.len()
            )));
        }
        Ok(Self {
            channels: [red, green, blue],
        })
    }

    /// Creates a colormap from RGB triples.
    pub fn from_rgb(entries: &[[u8; 3]]) -> Result<Self> {
        let red = entries.iter().map(|e| e[0]).collect();
        let green = entries.iter().map(|e| e[1]).collect();
        let blue = entries.iter().map(|e| e[2]).collect();
        Self::new(red, green, blue)
    }

    /// Creates a linear gray ramp of `len` entries from black to white.
    pub fn gray_ramp(len: usize) -> Result<Self> {
        let ramp: Vec<u8> = (0..len)
            .map(|i| {
                if len <= 1 {
                    0
                } else {
                    ((i * 255) / (len - 1)) as u8
                }
            })
            .collect();
        Self::new(ramp.clone(), ramp.clone(), ramp)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Always `false` for a constructed colormap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels[0].is_empty()
    }

    /// The RGB triple at `index`.
    pub fn entry(&self, index: usize) -> Option<[u8; 3]> {
        (index < self.len()).then(|| {
            [
                self.channels[0][index],
                self.channels[1][index],
                self.channels[2][index],
            ]
        })
    }

    /// Mutable red, green and blue entries. The entry count is fixed.
    #[inline]
    pub fn channels_mut(&mut self) -> [&mut [u8]; 3] {
        let [red, green, blue] = &mut self.channels;
        [red.as_mut_slice(), green.as_mut_slice(), blue.as_mut_slice()]
    }

    /// Expands a single-band index raster into a 3-band RGB raster.
    ///
    /// Indices beyond the palette expand to black.
    pub fn expand(&self, indices: &Raster<u8>) -> Result<Raster<u8>> {
        if indices.bands() != 1 {
            return Err(Error::band_mismatch(1, indices.bands()));
        }
        let mut rgb = Raster::new(indices.bounds(), 3)?;
        for (dst, &idx) in rgb.data_mut().chunks_exact_mut(3).zip(indices.data()) {
            let color = self.entry(idx as usize).unwrap_or([0, 0, 0]);
            dst.copy_from_slice(&color);
        }
        Ok(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;

    #[test]
    fn test_new_validates() {
        assert!(Colormap::new(vec![], vec![], vec![]).is_err());
        assert!(Colormap::new(vec![0; 4], vec![0; 4], vec![0; 3]).is_err());
        assert!(Colormap::new(vec![0; 257], vec![0; 257], vec![0; 257]).is_err());
        assert!(Colormap::new(vec![0; 256], vec![0; 256], vec![0; 256]).is_ok());
    }

    #[test]
    fn test_gray_ramp() {
        let cmap = Colormap::gray_ramp(256).unwrap();
        assert_eq!(cmap.entry(0), Some([0, 0, 0]));
        assert_eq!(cmap.entry(128), Some([128, 128, 128]));
        assert_eq!(cmap.entry(255), Some([255, 255, 255]));
        assert_eq!(cmap.entry(256), None);
    }

    #[test]
    fn test_channels_mut_keeps_entry_count() {
        let mut cmap = Colormap::gray_ramp(4).unwrap();
        for channel in cmap.channels_mut() {
            channel.iter_mut().for_each(|v| *v = v.saturating_add(100));
        }
        assert_eq!(cmap.len(), 4);
        assert_eq!(cmap.entry(3), Some([255, 255, 255]));
        assert_eq!(cmap.entry(1), Some([185, 185, 185]));

        let idx = Raster::from_vec(Rect::from_size(2, 1), 1, vec![0u8, 3]).unwrap();
        let rgb = cmap.expand(&idx).unwrap();
        assert_eq!(rgb.data(), &[100, 100, 100, 255, 255, 255]);
    }

    #[test]
    fn test_expand() {
        let cmap = Colormap::from_rgb(&[[10, 20, 30], [40, 50, 60]]).unwrap();
        let idx = Raster::from_vec(Rect::new(5, 5, 3, 1), 1, vec![1u8, 0, 7]).unwrap();
        let rgb = cmap.expand(&idx).unwrap();
        assert_eq!(rgb.bounds(), Rect::new(5, 5, 3, 1));
        assert_eq!(rgb.data(), &[40, 50, 60, 10, 20, 30, 0, 0, 0]);
    }
}
