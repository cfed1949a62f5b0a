//! End-to-end lookups over a 100x100 RGB fixture, checked by histogram.
//!
//! The fixture holds four flat regions:
//!
//! | region                          | pixels | value           |
//! |---------------------------------|--------|-----------------|
//! | square x 20..91, y 15..86       | 5041   | (200, 255, 200) |
//! | rows 0..5, plus row 5 x 0..71   | 571    | (180, 255, 0)   |
//! | row 95, plus row 96 x 0..27     | 127    | (20, 20, 20)    |
//! | everything else                 | 4261   | (0, 0, 0)       |
//!
//! The ROI rectangle x 14..89, y 11..86 covers 4899 pixels of the square
//! and none of the other non-zero regions.

use lutmap_core::{PixelFormat, Raster, RasterBuf, Rect, SampleType};
use lutmap_lut::{NoDataMode, NoDataRange, RoiMask};
use lutmap_ops::{LookupOp, LookupParams, render_serial};

const SIZE: u32 = 100;

fn fixture() -> RasterBuf {
    let mut img = Raster::<u8>::new(Rect::from_size(SIZE, SIZE), 3).unwrap();
    let mut paint = |rect: Rect, rgb: [u8; 3]| {
        for (x, y) in rect.iter_coords() {
            img.pixel_mut(x, y).copy_from_slice(&rgb);
        }
    };
    paint(Rect::new(20, 15, 71, 71), [200, 255, 200]);
    paint(Rect::new(0, 0, 100, 5), [180, 255, 0]);
    paint(Rect::new(0, 5, 71, 1), [180, 255, 0]);
    paint(Rect::new(0, 95, 100, 1), [20, 20, 20]);
    paint(Rect::new(0, 96, 27, 1), [20, 20, 20]);
    img.into()
}

fn roi() -> RoiMask {
    RoiMask::from_rects(Rect::from_size(SIZE, SIZE), &[Rect::new(14, 11, 75, 75)]).unwrap()
}

/// Non-empty bins of `band` as (value, count), ascending.
fn histogram(buf: &RasterBuf, band: usize) -> Vec<(u8, usize)> {
    let raster = buf.as_raster::<u8>().expect("u8 raster");
    let mut bins = [0usize; 256];
    for px in raster.data().chunks_exact(raster.bands()) {
        bins[px[band] as usize] += 1;
    }
    (0..=255u8)
        .filter(|&v| bins[v as usize] > 0)
        .map(|v| (v, bins[v as usize]))
        .collect()
}

fn run(params: LookupParams) -> RasterBuf {
    let identity: Vec<u8> = (0..=255).collect();
    let op = LookupOp::new(identity, PixelFormat::new(SampleType::U8, 3), params).unwrap();
    let out = render_serial(&op, &fixture(), 32, 32).unwrap();

    #[cfg(feature = "parallel")]
    assert_eq!(lutmap_ops::parallel::render(&op, &fixture(), 32, 32).unwrap(), out);

    out
}

fn exclusions() -> LookupParams {
    LookupParams::new().with_destination_no_data(0.0)
}

#[test]
fn test_input_histogram() {
    let img = fixture();
    assert_eq!(histogram(&img, 0), [(0, 4261), (20, 127), (180, 571), (200, 5041)]);
    assert_eq!(histogram(&img, 1), [(0, 4261), (20, 127), (255, 5612)]);
    assert_eq!(histogram(&img, 2), [(0, 4832), (20, 127), (200, 5041)]);
}

#[test]
fn test_pass_through_keeps_histogram() {
    let img = fixture();
    let out = run(LookupParams::new());
    for band in 0..3 {
        assert_eq!(histogram(&out, band), histogram(&img, band));
    }
}

#[test]
fn test_no_data_pixel_mode() {
    let out = run(exclusions().with_no_data(NoDataRange::point(200.0)));
    assert_eq!(histogram(&out, 0), [(0, 9302), (20, 127), (180, 571)]);
    assert_eq!(histogram(&out, 1), [(0, 9302), (20, 127), (255, 571)]);
    assert_eq!(histogram(&out, 2), [(0, 9873), (20, 127)]);
}

#[test]
fn test_no_data_sample_mode() {
    let out = run(
        exclusions()
            .with_no_data(NoDataRange::point(200.0))
            .with_no_data_mode(NoDataMode::Sample),
    );
    assert_eq!(histogram(&out, 0), [(0, 9302), (20, 127), (180, 571)]);
    assert_eq!(histogram(&out, 1), [(0, 4261), (20, 127), (255, 5612)]);
    assert_eq!(histogram(&out, 2), [(0, 9873), (20, 127)]);
}

#[test]
fn test_roi_only() {
    for accessor in [false, true] {
        let out = run(exclusions().with_roi(roi()).with_roi_accessor(accessor));
        assert_eq!(histogram(&out, 0), [(0, 5101), (200, 4899)]);
        assert_eq!(histogram(&out, 1), [(0, 5101), (255, 4899)]);
        assert_eq!(histogram(&out, 2), [(0, 5101), (200, 4899)]);
    }
}

#[test]
fn test_roi_and_no_data_pixel_mode() {
    for accessor in [false, true] {
        let out = run(
            exclusions()
                .with_roi(roi())
                .with_roi_accessor(accessor)
                .with_no_data(NoDataRange::point(200.0)),
        );
        for band in 0..3 {
            assert_eq!(histogram(&out, band), [(0, 10000)]);
        }
    }
}

#[test]
fn test_roi_and_no_data_sample_mode() {
    for accessor in [false, true] {
        let out = run(
            exclusions()
                .with_roi(roi())
                .with_roi_accessor(accessor)
                .with_no_data(NoDataRange::point(200.0))
                .with_no_data_mode(NoDataMode::Sample),
        );
        assert_eq!(histogram(&out, 0), [(0, 10000)]);
        assert_eq!(histogram(&out, 1), [(0, 5101), (255, 4899)]);
        assert_eq!(histogram(&out, 2), [(0, 10000)]);
    }
}
