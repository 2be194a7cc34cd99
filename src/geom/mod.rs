//! Geometry types shared by the tiler, the stitcher and the CLI.
//!
//! All rectangles live in the pixel space of the original image, with the
//! origin at the top-left corner. Tile rectangles are half-open:
//! `[left, right) x [top, bottom)`.
//!
//! # Example
//!
//! ```
//! use tilestitch::geom::{GridSize, ImageSize, TileRect};
//!
//! let rect = TileRect::new(976, 0, 2000, 1024);
//! assert_eq!(rect.width(), 1024);
//!
//! let grid = GridSize::new(2, 2);
//! assert_eq!(grid.index(1, 0), 1);
//! assert_eq!(ImageSize::new(2000, 1500).area(), 3_000_000);
//! ```

mod grid;
mod rect;
mod region;

pub use grid::{GridSize, ImageSize};
pub use rect::TileRect;
pub use region::Region;
