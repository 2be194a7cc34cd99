//! Conversion of absolute tile positions into `(x, y, width, height)` regions.
//!
//! Collaborators that attach per-tile parameters usually want a corner and a
//! size rather than two corners. [`split_coordinates`] accepts loosely typed
//! records (for example parsed from JSON) and validates their arity;
//! [`regions_from_rects`] is the infallible path for typed positions.

mod export;

pub use export::{to_csv_string, to_json_string, write_regions, RegionFormat};

use crate::error::{Result, TilestitchError};
use crate::geom::{Region, TileRect};

/// Converts `(x1, y1, x2, y2)` records into regions.
///
/// # Errors
/// Returns [`TilestitchError::CoordinateArity`] for the first record that
/// does not have exactly four values, and
/// [`TilestitchError::CoordinateOverflow`] when a width or height does not
/// fit in an `i64`. The reported index is 1-based.
///
/// # Example
///
/// ```
/// use tilestitch::coords::split_coordinates;
/// use tilestitch::geom::Region;
///
/// let regions = split_coordinates(&[[10, 20, 110, 220]]).unwrap();
/// assert_eq!(regions, vec![Region::new(10, 20, 100, 200)]);
/// ```
pub fn split_coordinates<R: AsRef<[i64]>>(positions: &[R]) -> Result<Vec<Region>> {
    positions
        .iter()
        .enumerate()
        .map(|(i, record)| match *record.as_ref() {
            [x1, y1, x2, y2] => match (x2.checked_sub(x1), y2.checked_sub(y1)) {
                (Some(width), Some(height)) => Ok(Region::new(x1, y1, width, height)),
                _ => Err(TilestitchError::CoordinateOverflow { index: i + 1 }),
            },
            ref other => Err(TilestitchError::CoordinateArity {
                index: i + 1,
                found: other.len(),
            }),
        })
        .collect()
}

/// Converts typed tile rectangles into regions.
pub fn regions_from_rects(rects: &[TileRect]) -> Vec<Region> {
    rects.iter().map(TileRect::to_region).collect()
}
