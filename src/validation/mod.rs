//! Tile layout validation.
//!
//! A layout is checked for:
//! - Grid arithmetic (the grid size matches the number of positions)
//! - Tile geometry (non-empty, inside the canvas, consistent sizes)
//! - Ordering (row-major, rows sharing a top edge)
//! - Coverage (the union of tiles is the whole canvas)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::geom::{GridSize, TileRect};
use crate::tiler::TileLayout;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a tile layout and returns a report of all issues found.
pub fn validate_layout(layout: &TileLayout, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();
    let grid = layout.grid_size;
    let (width, height) = layout.original_size.to_tuple();

    if width == 0 || height == 0 {
        report.add(ValidationIssue::error(
            IssueCode::InvalidCanvasSize,
            format!("Invalid canvas size {}x{} (must be positive)", width, height),
            IssueContext::Layout,
        ));
    }

    if grid.is_empty() {
        report.add(ValidationIssue::error(
            IssueCode::EmptyGrid,
            format!("Grid {}x{} has no tiles", grid.cols, grid.rows),
            IssueContext::Layout,
        ));
    } else if grid.tile_count() != layout.positions.len() {
        report.add(ValidationIssue::error(
            IssueCode::TileCountMismatch,
            format!(
                "Grid {}x{} expects {} tile(s), found {} position(s)",
                grid.cols,
                grid.rows,
                grid.tile_count(),
                layout.positions.len()
            ),
            IssueContext::Layout,
        ));
    }

    validate_tiles(layout, &mut report);

    // Ordering checks need the grid to describe the positions.
    if !grid.is_empty() && grid.tile_count() == layout.positions.len() {
        validate_ordering(&layout.positions, grid, &mut report);
    }

    if width > 0 && height > 0 {
        validate_coverage(&layout.positions, width, height, &mut report);
    }

    report
}

/// Validates every tile rectangle on its own.
fn validate_tiles(layout: &TileLayout, report: &mut ValidationReport) {
    let (width, height) = layout.original_size.to_tuple();
    let reference = layout.positions.first().map(|r| (r.width(), r.height()));

    for (index, rect) in layout.positions.iter().enumerate() {
        if rect.is_empty() {
            report.add(ValidationIssue::error(
                IssueCode::EmptyTile,
                format!("Tile {:?} covers no pixels", rect),
                IssueContext::Tile { index },
            ));
            continue;
        }

        if !rect.fits_within(width, height) {
            report.add(ValidationIssue::error(
                IssueCode::TileOutOfBounds,
                format!(
                    "Tile {:?} extends outside the canvas (0, 0, {}, {})",
                    rect, width, height
                ),
                IssueContext::Tile { index },
            ));
        }

        if let Some((ref_w, ref_h)) = reference {
            if (rect.width(), rect.height()) != (ref_w, ref_h) {
                report.add(ValidationIssue::warning(
                    IssueCode::InconsistentTileSize,
                    format!(
                        "Tile is {}x{} while tile 0 is {}x{}",
                        rect.width(),
                        rect.height(),
                        ref_w,
                        ref_h
                    ),
                    IssueContext::Tile { index },
                ));
            }
        }
    }
}

/// Validates row-major ordering and neighbour overlaps.
fn validate_ordering(positions: &[TileRect], grid: GridSize, report: &mut ValidationReport) {
    for row in 0..grid.rows {
        let tiles = &positions[grid.row_range(row)];

        for (col, pair) in tiles.windows(2).enumerate() {
            let index = grid.index(col as u32 + 1, row);
            let (prev, next) = (&pair[0], &pair[1]);

            if next.top != prev.top || next.left < prev.left {
                report.add(ValidationIssue::error(
                    IssueCode::NotRowMajor,
                    format!(
                        "Tile {:?} does not follow {:?} in row-major order",
                        next, prev
                    ),
                    IssueContext::Tile { index },
                ));
            } else if next.left == prev.right {
                report.add(ValidationIssue::warning(
                    IssueCode::NoOverlap,
                    "Tile abuts its left neighbour without overlap; the seam will not be blended",
                    IssueContext::Tile { index },
                ));
            }
        }

        if row > 0 {
            let prev = &positions[grid.index(0, row - 1)];
            let next = &positions[grid.index(0, row)];
            if next.top < prev.top {
                report.add(ValidationIssue::error(
                    IssueCode::NotRowMajor,
                    format!("Row starts above the previous row ({} < {})", next.top, prev.top),
                    IssueContext::Row { row },
                ));
            } else if next.top == prev.bottom {
                report.add(ValidationIssue::warning(
                    IssueCode::NoOverlap,
                    "Row abuts the previous row without overlap; the seam will not be blended",
                    IssueContext::Row { row },
                ));
            }
        }
    }
}

/// Checks that the union of tiles covers the whole canvas.
///
/// Uses the tile edges to split the canvas into cells; every cell is either
/// fully covered by some tile or not covered at all.
fn validate_coverage(
    positions: &[TileRect],
    width: u32,
    height: u32,
    report: &mut ValidationReport,
) {
    let xs = breakpoints(positions.iter().flat_map(|r| [r.left, r.right]), width);
    let ys = breakpoints(positions.iter().flat_map(|r| [r.top, r.bottom]), height);

    let mut uncovered: u64 = 0;
    for ys_pair in ys.windows(2) {
        for xs_pair in xs.windows(2) {
            let (x, y) = (xs_pair[0], ys_pair[0]);
            if !positions.iter().any(|r| r.contains(x, y)) {
                uncovered += u64::from(xs_pair[1] - x) * u64::from(ys_pair[1] - y);
            }
        }
    }

    if uncovered > 0 {
        report.add(ValidationIssue::error(
            IssueCode::UncoveredPixels,
            format!("{} pixel(s) of the canvas are not covered by any tile", uncovered),
            IssueContext::Layout,
        ));
    }
}

/// Sorted, deduplicated edges clamped to `[0, limit]`, including both ends.
fn breakpoints(edges: impl Iterator<Item = u32>, limit: u32) -> Vec<u32> {
    let mut points: Vec<u32> = edges.map(|e| e.min(limit)).chain([0, limit]).collect();
    points.sort_unstable();
    points.dedup();
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ImageSize;
    use crate::tiler::{plan, TileConfig};

    fn layout_with(positions: Vec<TileRect>, size: (u32, u32), grid: (u32, u32)) -> TileLayout {
        TileLayout {
            positions,
            original_size: ImageSize::from(size),
            grid_size: GridSize::from(grid),
        }
    }

    fn codes(report: &ValidationReport) -> Vec<IssueCode> {
        report.issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_planned_layout_is_clean() {
        let layout = plan(2000, 1500, &TileConfig::new(1024, 1024)).unwrap();
        let report = validate_layout(&layout, &ValidateOptions::default());
        assert!(report.is_clean(), "{}", report);
    }

    #[test]
    fn test_exact_multiple_warns_no_overlap() {
        let layout = plan(200, 100, &TileConfig::new(100, 100)).unwrap();
        let report = validate_layout(&layout, &ValidateOptions::default());
        assert!(report.is_ok());
        assert_eq!(codes(&report), vec![IssueCode::NoOverlap]);
    }

    #[test]
    fn test_gap_reports_uncovered_pixels() {
        let layout = layout_with(
            vec![TileRect::new(0, 0, 10, 10), TileRect::new(12, 0, 22, 10)],
            (22, 10),
            (2, 1),
        );
        let report = validate_layout(&layout, &ValidateOptions::default());
        assert_eq!(report.error_count(), 1);
        assert!(report.issues[0].message.starts_with("20 pixel(s)"));
    }

    #[test]
    fn test_count_mismatch_and_bounds() {
        let layout = layout_with(
            vec![TileRect::new(0, 0, 10, 10), TileRect::new(5, 0, 16, 10)],
            (15, 10),
            (3, 1),
        );
        let report = validate_layout(&layout, &ValidateOptions::default());
        let codes = codes(&report);
        assert!(codes.contains(&IssueCode::TileCountMismatch));
        assert!(codes.contains(&IssueCode::TileOutOfBounds));
        assert!(codes.contains(&IssueCode::InconsistentTileSize));
    }

    #[test]
    fn test_out_of_order_tiles() {
        let layout = layout_with(
            vec![TileRect::new(5, 0, 15, 10), TileRect::new(0, 0, 10, 10)],
            (15, 10),
            (2, 1),
        );
        let report = validate_layout(&layout, &ValidateOptions::default());
        assert_eq!(codes(&report), vec![IssueCode::NotRowMajor]);
    }

    #[test]
    fn test_empty_grid() {
        let layout = layout_with(vec![], (10, 10), (0, 0));
        let report = validate_layout(&layout, &ValidateOptions::default());
        let codes = codes(&report);
        assert!(codes.contains(&IssueCode::EmptyGrid));
        assert!(codes.contains(&IssueCode::UncoveredPixels));
    }
}
