//! Canvas and grid dimensions.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Size of the original image, `(width, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[inline]
    pub fn to_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for ImageSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl From<ImageSize> for (u32, u32) {
    fn from(size: ImageSize) -> Self {
        (size.width, size.height)
    }
}

/// Tiling dimensions, `(cols, rows)`.
///
/// Tiles are stored row-major: every tile of row 0 precedes row 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    #[inline]
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Number of tiles in the grid.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Row-major index of the tile at `(col, row)`.
    #[inline]
    pub fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    /// Index range of the tiles in `row`.
    #[inline]
    pub fn row_range(&self, row: u32) -> Range<usize> {
        let start = self.index(0, row);
        start..start + self.cols as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

impl From<(u32, u32)> for GridSize {
    fn from((cols, rows): (u32, u32)) -> Self {
        Self::new(cols, rows)
    }
}

impl From<GridSize> for (u32, u32) {
    fn from(grid: GridSize) -> Self {
        (grid.cols, grid.rows)
    }
}
