//! The per-tile transform capability and the split/process/assemble driver.
//!
//! The crate never looks inside a tile transform. Anything that maps an RGB
//! tile to a tile of the same size can be plugged in, either by implementing
//! [`TileProcessor`] or by passing a closure.

use image::RgbImage;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, TilestitchError};
use crate::stitch::{assemble, AssembleConfig};
use crate::tiler::{split, TileConfig, TiledImage};

/// A transform applied to each tile independently.
///
/// Implementations must return a tile with the same dimensions as the input.
/// Tiles are processed concurrently and in no particular order.
pub trait TileProcessor: Sync {
    fn process(&self, tile: RgbImage) -> Result<RgbImage>;
}

impl<F> TileProcessor for F
where
    F: Fn(RgbImage) -> RgbImage + Sync,
{
    fn process(&self, tile: RgbImage) -> Result<RgbImage> {
        Ok(self(tile))
    }
}

/// A processor that returns every tile unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl TileProcessor for Identity {
    fn process(&self, tile: RgbImage) -> Result<RgbImage> {
        Ok(tile)
    }
}

/// Runs `processor` over every tile in parallel, keeping batch order.
///
/// # Errors
/// Propagates the first processor error, and returns
/// [`TilestitchError::TileSizeMismatch`] if a processed tile changed size.
pub fn process_tiles<P: TileProcessor + ?Sized>(
    tiles: Vec<RgbImage>,
    processor: &P,
) -> Result<Vec<RgbImage>> {
    tiles
        .into_par_iter()
        .enumerate()
        .map(|(index, tile)| {
            let expected = tile.dimensions();
            let processed = processor.process(tile)?;
            if processed.dimensions() != expected {
                return Err(TilestitchError::TileSizeMismatch {
                    index,
                    expected,
                    actual: processed.dimensions(),
                });
            }
            Ok(processed)
        })
        .collect()
}

/// Splits `image`, transforms each tile and stitches the result back.
pub fn process_image<P: TileProcessor + ?Sized>(
    image: &RgbImage,
    tile_config: &TileConfig,
    assemble_config: &AssembleConfig,
    processor: &P,
) -> Result<RgbImage> {
    assemble_config.validate()?;

    let TiledImage { tiles, layout } = split(image, tile_config)?;
    info!(
        width = image.width(),
        height = image.height(),
        cols = layout.grid_size.cols,
        rows = layout.grid_size.rows,
        "split image into tiles"
    );

    let processed = process_tiles(tiles, processor)?;
    debug!(count = processed.len(), "processed tiles");

    assemble(&processed, &layout, assemble_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{imageops, Rgb};

    fn sample(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]))
    }

    #[test]
    fn test_identity_pipeline_is_lossless() {
        let image = sample(200, 150);
        let out = process_image(
            &image,
            &TileConfig::new(64, 64),
            &AssembleConfig::new(16),
            &Identity,
        )
        .expect("pipeline");
        assert_eq!(out, image);
    }

    #[test]
    fn test_closure_processor() {
        let image = RgbImage::from_pixel(90, 90, Rgb([10, 20, 30]));
        let invert = |mut tile: RgbImage| {
            imageops::invert(&mut tile);
            tile
        };
        let out = process_image(
            &image,
            &TileConfig::new(40, 40),
            &AssembleConfig::default(),
            &invert,
        )
        .expect("pipeline");
        assert!(out.pixels().all(|p| *p == Rgb([245, 235, 225])));
    }

    #[test]
    fn test_resizing_processor_rejected() {
        let tiles = vec![RgbImage::new(8, 8), RgbImage::new(8, 8)];
        let shrink = |_tile: RgbImage| RgbImage::new(4, 4);
        let err = process_tiles(tiles, &shrink).unwrap_err();
        assert!(matches!(err, TilestitchError::TileSizeMismatch { .. }));
    }

    struct Failing;

    impl TileProcessor for Failing {
        fn process(&self, _tile: RgbImage) -> Result<RgbImage> {
            Err(TilestitchError::invalid_config("processor", "always fails"))
        }
    }

    #[test]
    fn test_processor_error_propagates() {
        let err = process_tiles(vec![RgbImage::new(2, 2)], &Failing).unwrap_err();
        assert!(err.is_configuration());
    }
}
