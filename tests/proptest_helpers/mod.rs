#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use tilestitch::geom::TileRect;
use tilestitch::TileConfig;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Image dimensions up to `max_dim` with a tile size giving at most
/// `max_tiles` tiles per axis (tiles may also exceed the image).
pub fn arb_dims_and_tile(
    max_dim: u32,
    max_tiles: u32,
) -> impl Strategy<Value = (u32, u32, TileConfig)> {
    (1..=max_dim, 1..=max_dim)
        .prop_flat_map(move |(w, h)| {
            (
                Just(w),
                Just(h),
                (w / max_tiles).max(1)..=w + 16,
                (h / max_tiles).max(1)..=h + 16,
            )
        })
        .prop_map(|(w, h, tw, th)| (w, h, TileConfig::new(tw, th)))
}

/// Small images whose pixels can be split and reassembled in every case.
pub fn arb_image_and_tile() -> impl Strategy<Value = (u32, u32, TileConfig)> {
    arb_dims_and_tile(96, 12)
}

/// Geometry-only dimensions, large enough to exercise many-tile grids.
pub fn arb_geometry() -> impl Strategy<Value = (u32, u32, TileConfig)> {
    arb_dims_and_tile(5000, 24)
}

/// Counts canvas pixels not covered by any rectangle.
pub fn uncovered_pixels(rects: &[TileRect], width: u32, height: u32) -> u64 {
    let mut xs: Vec<u32> = rects
        .iter()
        .flat_map(|r| [r.left, r.right])
        .chain([0, width])
        .map(|v| v.min(width))
        .collect();
    let mut ys: Vec<u32> = rects
        .iter()
        .flat_map(|r| [r.top, r.bottom])
        .chain([0, height])
        .map(|v| v.min(height))
        .collect();
    xs.sort_unstable();
    xs.dedup();
    ys.sort_unstable();
    ys.dedup();

    let mut uncovered = 0;
    for yw in ys.windows(2) {
        for xw in xs.windows(2) {
            if !rects.iter().any(|r| r.contains(xw[0], yw[0])) {
                uncovered += u64::from(xw[1] - xw[0]) * u64::from(yw[1] - yw[0]);
            }
        }
    }
    uncovered
}
