//! Reassembly of processed tiles into a single seamless image.
//!
//! Assembly runs in two passes. Each grid row is first stitched left to
//! right into a row image, then the row images are stitched top to bottom.
//! Wherever neighbouring tiles overlap, a linear gradient over at most
//! `padding` pixels, centred in the overlap, hides the seam.
//!
//! Rows are independent of each other and are stitched in parallel. Within a
//! row (and in the column pass) every blend consumes the result of the
//! previous one, so order is fixed.

mod blend;

pub use blend::{blend_pixel, gradient_mask, Axis};

use image::RgbImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TilestitchError};
use crate::geom::TileRect;
use crate::tiler::TileLayout;

use blend::stitch_strip;

/// Default maximum width of a blended seam, in pixels.
pub const DEFAULT_PADDING: u32 = 64;

/// Options for [`assemble`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleConfig {
    /// Maximum width (or height) of the blended transition strip.
    pub padding: u32,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

impl AssembleConfig {
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }

    /// Rejects a zero padding.
    pub fn validate(&self) -> Result<()> {
        if self.padding == 0 {
            return Err(TilestitchError::invalid_config(
                "padding",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Signed overlap between the far edge of one extent and the start of the next.
#[inline]
fn overlap(prev_end: u32, next_start: u32) -> i64 {
    i64::from(prev_end) - i64::from(next_start)
}

/// Checks that tiles, positions and grid agree before any pixels move.
fn check_inputs(tiles: &[RgbImage], layout: &TileLayout) -> Result<()> {
    let grid = layout.grid_size;
    let expected = grid.tile_count();
    if grid.is_empty() || tiles.len() != expected || layout.positions.len() != expected {
        return Err(TilestitchError::TileCountMismatch {
            cols: grid.cols,
            rows: grid.rows,
            expected,
            tiles: tiles.len(),
            positions: layout.positions.len(),
        });
    }

    for (index, (tile, rect)) in tiles.iter().zip(&layout.positions).enumerate() {
        let expected = (rect.width(), rect.height());
        if tile.dimensions() != expected {
            return Err(TilestitchError::TileSizeMismatch {
                index,
                expected,
                actual: tile.dimensions(),
            });
        }
    }

    Ok(())
}

/// Stitches one grid row left to right.
///
/// `tiles` and `positions` must be the row's slices of the full batch.
pub fn stitch_row(tiles: &[RgbImage], positions: &[TileRect], padding: u32) -> Result<RgbImage> {
    let overlaps: Vec<i64> = positions
        .windows(2)
        .map(|pair| overlap(pair[0].right, pair[1].left))
        .collect();
    stitch_strip(tiles, &overlaps, Axis::Horizontal, padding)
}

/// Reassembles the tiles of `layout` into an image of the original size.
///
/// `tiles` must be aligned 1:1 with `layout.positions` and have the
/// dimensions of their rectangles; their pixel content may differ from what
/// [`crate::tiler::split`] produced.
///
/// # Errors
/// - [`TilestitchError::InvalidConfig`] if `config.padding` is zero.
/// - [`TilestitchError::TileCountMismatch`] or
///   [`TilestitchError::TileSizeMismatch`] if the tiles do not match the
///   layout.
/// - [`TilestitchError::StripSizeMismatch`] if neighbouring extents cannot
///   be blended.
/// - [`TilestitchError::CanvasSizeMismatch`] if the positions do not
///   reconstruct the original size.
pub fn assemble(tiles: &[RgbImage], layout: &TileLayout, config: &AssembleConfig) -> Result<RgbImage> {
    config.validate()?;
    check_inputs(tiles, layout)?;

    let grid = layout.grid_size;
    let padding = config.padding;

    let row_images: Vec<RgbImage> = (0..grid.rows)
        .into_par_iter()
        .map(|row| {
            let range = grid.row_range(row);
            stitch_row(&tiles[range.clone()], &layout.positions[range], padding)
        })
        .collect::<Result<_>>()?;

    let row_overlaps: Vec<i64> = (1..grid.rows)
        .map(|row| {
            let prev = &layout.positions[grid.index(0, row - 1)];
            let next = &layout.positions[grid.index(0, row)];
            overlap(prev.bottom, next.top)
        })
        .collect();

    let image = stitch_strip(&row_images, &row_overlaps, Axis::Vertical, padding)?;

    let expected = layout.original_size.to_tuple();
    if image.dimensions() != expected {
        return Err(TilestitchError::CanvasSizeMismatch {
            expected,
            actual: image.dimensions(),
        });
    }

    debug!(
        cols = grid.cols,
        rows = grid.rows,
        padding,
        width = image.width(),
        height = image.height(),
        "assembled tiles"
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{GridSize, ImageSize};
    use crate::tiler::{split, TileConfig};
    use image::Rgb;

    fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, ((x * 7 + y * 3) % 256) as u8])
        })
    }

    #[test]
    fn test_identity_roundtrip() {
        let image = gradient_image(130, 97);
        let (tiles, layout) = split(&image, &TileConfig::new(48, 40))
            .expect("split")
            .into_parts();

        for padding in [1, 3, 8, 64] {
            let restored =
                assemble(&tiles, &layout, &AssembleConfig::new(padding)).expect("assemble");
            assert_eq!(restored, image, "padding {}", padding);
        }
    }

    #[test]
    fn test_single_tile_returned_unchanged() {
        let image = gradient_image(80, 60);
        let (tiles, layout) = split(&image, &TileConfig::default())
            .expect("split")
            .into_parts();
        assert_eq!(layout.grid_size, GridSize::new(1, 1));

        let restored = assemble(&tiles, &layout, &AssembleConfig::default()).expect("assemble");
        assert_eq!(restored, tiles[0]);
    }

    #[test]
    fn test_seam_blends_between_tiles() {
        let layout = TileLayout {
            positions: vec![TileRect::new(0, 0, 10, 4), TileRect::new(6, 0, 16, 4)],
            original_size: ImageSize::new(16, 4),
            grid_size: GridSize::new(2, 1),
        };
        let tiles = vec![
            RgbImage::from_pixel(10, 4, Rgb([255, 255, 255])),
            RgbImage::from_pixel(10, 4, Rgb([0, 0, 0])),
        ];

        let out = assemble(&tiles, &layout, &AssembleConfig::new(4)).expect("assemble");
        let row: Vec<u8> = (0..16).map(|x| out.get_pixel(x, 0).0[0]).collect();
        assert_eq!(&row[..7], &[255; 7]);
        assert!(row[7] > row[8] && row[8] > row[9]);
        assert_eq!(&row[10..], &[0; 6]);
    }

    #[test]
    fn test_tile_count_mismatch() {
        let image = gradient_image(100, 100);
        let (mut tiles, layout) = split(&image, &TileConfig::new(60, 60))
            .expect("split")
            .into_parts();
        tiles.pop();

        let err = assemble(&tiles, &layout, &AssembleConfig::default()).unwrap_err();
        assert!(matches!(err, TilestitchError::TileCountMismatch { .. }));
    }

    #[test]
    fn test_tile_size_mismatch() {
        let image = gradient_image(100, 100);
        let (mut tiles, layout) = split(&image, &TileConfig::new(60, 60))
            .expect("split")
            .into_parts();
        tiles[2] = RgbImage::new(59, 60);

        let err = assemble(&tiles, &layout, &AssembleConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TilestitchError::TileSizeMismatch { index: 2, .. }
        ));
    }

    #[test]
    fn test_wrong_original_size_rejected() {
        let image = gradient_image(100, 50);
        let (tiles, mut layout) = split(&image, &TileConfig::new(60, 60))
            .expect("split")
            .into_parts();
        layout.original_size = ImageSize::new(101, 50);

        let err = assemble(&tiles, &layout, &AssembleConfig::default()).unwrap_err();
        assert!(matches!(err, TilestitchError::CanvasSizeMismatch { .. }));
    }

    #[test]
    fn test_zero_padding_rejected() {
        let image = gradient_image(10, 10);
        let (tiles, layout) = split(&image, &TileConfig::default())
            .expect("split")
            .into_parts();
        let err = assemble(&tiles, &layout, &AssembleConfig::new(0)).unwrap_err();
        assert!(err.is_configuration());
    }
}
