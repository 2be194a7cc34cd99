//! Reading and writing tile directories and whole images.

use std::fs;
use std::path::Path;

use image::RgbImage;
use tracing::debug;

use super::{read_manifest, write_manifest, TileManifest, MANIFEST_FILE_NAME};
use crate::error::{Result, TilestitchError};
use crate::tiler::{TileConfig, TileLayout, TiledImage};

/// File name of the tile at grid cell `(row, col)`.
pub fn tile_file_name(row: u32, col: u32) -> String {
    format!("tile_{:03}_{:03}.png", row, col)
}

/// Loads an image from disk as 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|source| TilestitchError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

/// Saves an image, inferring the format from the extension.
pub fn save_image(path: &Path, image: &RgbImage) -> Result<()> {
    image.save(path).map_err(|source| TilestitchError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes every tile as PNG plus a `manifest.json` into `dir`.
///
/// The directory is created if needed. Returns the manifest written.
pub fn write_tile_dir(dir: &Path, tiled: &TiledImage, tile_size: TileConfig) -> Result<TileManifest> {
    fs::create_dir_all(dir)?;

    let manifest = TileManifest::from_layout(&tiled.layout, tile_size);
    for (entry, tile) in manifest.tiles.iter().zip(&tiled.tiles) {
        save_image(&dir.join(&entry.file), tile)?;
    }
    write_manifest(&dir.join(MANIFEST_FILE_NAME), &manifest)?;

    debug!(dir = %dir.display(), count = manifest.tiles.len(), "wrote tile directory");
    Ok(manifest)
}

/// Reads a manifest and the tiles it references.
///
/// Tile paths are resolved relative to the manifest's directory. Tiles are
/// returned in index order, aligned with the returned layout.
pub fn read_tile_dir(manifest_path: &Path) -> Result<(Vec<RgbImage>, TileLayout)> {
    let manifest = read_manifest(manifest_path)?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let mut entries: Vec<_> = manifest.tiles.iter().collect();
    entries.sort_by_key(|e| e.index);

    let tiles = entries
        .iter()
        .map(|entry| load_image(&base.join(&entry.file)))
        .collect::<Result<Vec<_>>>()?;

    Ok((tiles, manifest.to_layout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiler::split;
    use image::Rgb;

    #[test]
    fn test_tile_dir_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let image = RgbImage::from_fn(50, 30, |x, y| Rgb([x as u8, y as u8, 9]));
        let config = TileConfig::new(32, 32);
        let tiled = split(&image, &config).unwrap();

        let manifest = write_tile_dir(temp.path(), &tiled, config).unwrap();
        assert_eq!(manifest.tiles.len(), 2);
        assert!(temp.path().join("tile_000_001.png").exists());

        let (tiles, layout) = read_tile_dir(&temp.path().join(MANIFEST_FILE_NAME)).unwrap();
        assert_eq!(layout, tiled.layout);
        assert_eq!(tiles, tiled.tiles);
    }

    #[test]
    fn test_missing_tile_is_load_error() {
        let temp = tempfile::tempdir().unwrap();
        let image = RgbImage::new(40, 10);
        let config = TileConfig::new(32, 32);
        let tiled = split(&image, &config).unwrap();
        write_tile_dir(temp.path(), &tiled, config).unwrap();
        fs::remove_file(temp.path().join(tile_file_name(0, 1))).unwrap();

        let err = read_tile_dir(&temp.path().join(MANIFEST_FILE_NAME)).unwrap_err();
        assert!(matches!(err, TilestitchError::ImageLoad { .. }));
    }
}
