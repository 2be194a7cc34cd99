//! Partitioning of an image into a grid of overlapping, fixed-size tiles.
//!
//! Tile placement is computed per axis. When the image is larger than the
//! tile along an axis, `n = ceil(size / tile)` tiles are used and the surplus
//! `n * tile - size` is spread as a uniform overlap between neighbours using
//! integer division. Any residue from that truncation is absorbed by the last
//! pair, because the last tile is shifted back so that its far edge lands
//! exactly on the canvas edge. Tiles are never shrunk on an axis where the
//! image is larger than the tile.

mod layout;

pub use layout::TileLayout;

use image::{imageops, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TilestitchError};
use crate::geom::{GridSize, ImageSize, TileRect};

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 1024;

/// Requested tile dimensions for [`split`] and [`plan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileConfig {
    pub tile_width: u32,
    pub tile_height: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
        }
    }
}

impl TileConfig {
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
        }
    }

    /// Rejects zero tile dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.tile_width == 0 {
            return Err(TilestitchError::invalid_config(
                "tile_width",
                "must be greater than 0",
            ));
        }
        if self.tile_height == 0 {
            return Err(TilestitchError::invalid_config(
                "tile_height",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// The output of [`split`]: the cropped tiles and the layout they came from.
///
/// `tiles[i]` was cropped from `layout.positions[i]`.
#[derive(Clone, Debug)]
pub struct TiledImage {
    pub tiles: Vec<RgbImage>,
    pub layout: TileLayout,
}

impl TiledImage {
    /// Splits into the tile batch and the layout.
    pub fn into_parts(self) -> (Vec<RgbImage>, TileLayout) {
        (self.tiles, self.layout)
    }
}

/// Number of tiles and the stride between tile origins along one axis.
///
/// Returns `(1, 0)` when the axis fits in a single tile.
fn axis_step(size: u32, tile_size: u32) -> (u32, u32) {
    if size <= tile_size {
        return (1, 0);
    }

    let num_tiles = size.div_ceil(tile_size);
    let total_overlap = u64::from(num_tiles) * u64::from(tile_size) - u64::from(size);
    // Truncating division; the last pair absorbs the remainder.
    let overlap = (total_overlap / u64::from(num_tiles - 1)) as u32;
    (num_tiles, tile_size - overlap)
}

/// Places one tile along an axis, shifting it back if it would overflow.
fn place(start: u32, tile_size: u32, size: u32) -> (u32, u32) {
    let end = start.saturating_add(tile_size).min(size);
    if end - start < tile_size {
        (size.saturating_sub(tile_size), end)
    } else {
        (start, end)
    }
}

/// Computes the tile layout for a `width` x `height` image.
///
/// # Errors
/// Returns [`TilestitchError::InvalidConfig`] if the tile or image
/// dimensions are zero.
pub fn plan(width: u32, height: u32, config: &TileConfig) -> Result<TileLayout> {
    config.validate()?;
    if width == 0 || height == 0 {
        return Err(TilestitchError::invalid_config(
            "image",
            format!("dimensions {}x{} must be positive", width, height),
        ));
    }

    let original_size = ImageSize::new(width, height);
    let (tile_width, tile_height) = (config.tile_width, config.tile_height);

    if width <= tile_width && height <= tile_height {
        debug!(width, height, "image fits in a single tile");
        return Ok(TileLayout {
            positions: vec![TileRect::new(0, 0, width, height)],
            original_size,
            grid_size: GridSize::new(1, 1),
        });
    }

    let (num_cols, step_x) = axis_step(width, tile_width);
    let (num_rows, step_y) = axis_step(height, tile_height);

    let mut positions = Vec::with_capacity(num_cols as usize * num_rows as usize);
    for row in 0..num_rows {
        let (top, bottom) = place(row * step_y, tile_height, height);
        for col in 0..num_cols {
            let (left, right) = place(col * step_x, tile_width, width);
            positions.push(TileRect::new(left, top, right, bottom));
        }
    }

    debug!(
        width,
        height,
        num_cols,
        num_rows,
        step_x,
        step_y,
        "planned tile grid"
    );

    Ok(TileLayout {
        positions,
        original_size,
        grid_size: GridSize::new(num_cols, num_rows),
    })
}

/// Splits `image` into overlapping tiles of the configured size.
///
/// Tiles are returned in row-major order, aligned 1:1 with
/// `layout.positions`. Each tile is an independent buffer.
pub fn split(image: &RgbImage, config: &TileConfig) -> Result<TiledImage> {
    let layout = plan(image.width(), image.height(), config)?;

    let tiles: Vec<RgbImage> = layout
        .positions
        .par_iter()
        .map(|rect| {
            imageops::crop_imm(image, rect.left, rect.top, rect.width(), rect.height()).to_image()
        })
        .collect();

    Ok(TiledImage { tiles, layout })
}
