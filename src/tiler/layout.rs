//! The geometric result of tiling: positions, canvas size and grid size.

use serde::{Deserialize, Serialize};

use crate::geom::{GridSize, ImageSize, Region, TileRect};

/// Where every tile of a split image sits on the original canvas.
///
/// Produced once by [`super::plan`] or [`super::split`] and consumed by
/// [`crate::stitch::assemble`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    /// Tile rectangles in row-major order.
    pub positions: Vec<TileRect>,
    /// Size of the source image.
    pub original_size: ImageSize,
    /// `(cols, rows)` of the tile grid.
    pub grid_size: GridSize,
}

impl TileLayout {
    /// Number of tile positions.
    pub fn tile_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the positions belonging to grid row `row`.
    ///
    /// Returns an empty slice if the row is outside the grid or the
    /// positions list is shorter than the grid implies.
    pub fn row(&self, row: u32) -> &[TileRect] {
        self.positions
            .get(self.grid_size.row_range(row))
            .unwrap_or(&[])
    }

    /// Returns the positions as `(x, y, width, height)` regions.
    pub fn regions(&self) -> Vec<Region> {
        self.positions.iter().map(TileRect::to_region).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_slices() {
        let layout = TileLayout {
            positions: vec![
                TileRect::new(0, 0, 10, 10),
                TileRect::new(5, 0, 15, 10),
                TileRect::new(0, 5, 10, 15),
                TileRect::new(5, 5, 15, 15),
            ],
            original_size: ImageSize::new(15, 15),
            grid_size: GridSize::new(2, 2),
        };

        assert_eq!(layout.row(1), &layout.positions[2..4]);
        assert!(layout.row(2).is_empty());
        assert_eq!(layout.regions()[1], Region::new(5, 0, 10, 10));
    }
}
