//! Destination pixel format negotiation.
//!
//! Three formats meet in a lookup: the source raster's, the table's native
//! one, and possibly a caller-provided destination hint. The rule is fixed
//! and never fails:
//!
//! - destination sample type = table sample type (a byte source can be
//!   remapped through a float table)
//! - tables with 3 or more bands give one destination band per table band
//! - narrower tables are broadcast: destination band count follows the
//!   source and every band reads table band 0
//! - a hint is kept only if it already agrees with both
//!
//! ```
//! use lutmap_core::{PixelFormat, SampleType};
//! use lutmap_lut::negotiate;
//!
//! let source = PixelFormat::new(SampleType::U8, 3);
//! let table = PixelFormat::new(SampleType::F32, 1);
//! assert_eq!(negotiate(source, table, None), PixelFormat::new(SampleType::F32, 3));
//! ```

use lutmap_core::PixelFormat;
use tracing::debug;

/// Below this many table bands, table band 0 is broadcast to every
/// destination band.
pub const BROADCAST_BELOW: usize = 3;

/// `true` if a table with `table_bands` bands is broadcast.
#[inline]
pub const fn is_broadcast(table_bands: usize) -> bool {
    table_bands < BROADCAST_BELOW
}

/// Destination band count for a table and source band count.
#[inline]
pub const fn dest_band_count(table_bands: usize, source_bands: usize) -> usize {
    if is_broadcast(table_bands) {
        source_bands
    } else {
        table_bands
    }
}

/// Derives the destination format, reusing `hint` when it is compatible.
pub fn negotiate(source: PixelFormat, table: PixelFormat, hint: Option<PixelFormat>) -> PixelFormat {
    let derived = PixelFormat::new(
        table.sample_type,
        dest_band_count(table.bands, source.bands),
    );
    match hint {
        Some(h) if h == derived => h,
        Some(h) => {
            debug!(hint = %h, derived = %derived, "Destination hint incompatible with table, replacing");
            derived
        }
        None => derived,
    }
}
