//! Tile size suggestions derived from a desired grid and overlap.
//!
//! Given how many tiles should span each axis and what fraction of a tile
//! should overlap its neighbour, the suggested tile edge is
//! `size / (factor * (1 - overlap_rate))`, rounded down to a multiple of 8
//! so it lines up with 8-pixel latent blocks.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilestitchError};
use crate::tiler::TileConfig;

/// Tile edges are rounded down to a multiple of this.
pub const TILE_ALIGNMENT: u32 = 8;

/// Inputs to [`suggest_tile_size`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Tiles across the width, 1 to 10.
    pub width_factor: u32,
    /// Tiles down the height, 1 to 10.
    pub height_factor: u32,
    /// Fraction of a tile shared with its neighbour, 0.05 to 0.95.
    pub overlap_rate: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            width_factor: 3,
            height_factor: 3,
            overlap_rate: 0.1,
        }
    }
}

impl SizingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.width_factor) {
            return Err(TilestitchError::invalid_config(
                "width_factor",
                "must be between 1 and 10",
            ));
        }
        if !(1..=10).contains(&self.height_factor) {
            return Err(TilestitchError::invalid_config(
                "height_factor",
                "must be between 1 and 10",
            ));
        }
        if !(0.05..=0.95).contains(&self.overlap_rate) {
            return Err(TilestitchError::invalid_config(
                "overlap_rate",
                "must be between 0.05 and 0.95",
            ));
        }
        Ok(())
    }
}

fn suggest_edge(size: u32, factor: u32, overlap_rate: f64) -> u32 {
    let edge = (f64::from(size) / (f64::from(factor) * (1.0 - overlap_rate))) as u32;
    edge / TILE_ALIGNMENT * TILE_ALIGNMENT
}

/// Suggests a tile size for a `width` x `height` image.
///
/// # Errors
/// Returns [`TilestitchError::InvalidConfig`] if the config is out of range
/// or the image is too small to yield a non-zero aligned tile.
///
/// # Example
///
/// ```
/// use tilestitch::sizing::{suggest_tile_size, SizingConfig};
///
/// let tile = suggest_tile_size(3000, 2000, &SizingConfig::default()).unwrap();
/// assert_eq!((tile.tile_width, tile.tile_height), (1104, 736));
/// ```
pub fn suggest_tile_size(width: u32, height: u32, config: &SizingConfig) -> Result<TileConfig> {
    config.validate()?;

    let tile_width = suggest_edge(width, config.width_factor, config.overlap_rate);
    let tile_height = suggest_edge(height, config.height_factor, config.overlap_rate);

    let tile = TileConfig::new(tile_width, tile_height);
    tile.validate().map_err(|_| {
        TilestitchError::invalid_config(
            "image",
            format!(
                "{}x{} is too small for a {}x{} grid",
                width, height, config.width_factor, config.height_factor
            ),
        )
    })?;
    Ok(tile)
}
