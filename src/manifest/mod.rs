//! JSON manifest describing a directory of split tiles.
//!
//! The manifest records everything [`crate::stitch::assemble`] needs besides
//! the pixels: where each tile sits, the original canvas size and the grid
//! size. Tile positions are stored as `[left, top, right, bottom]` arrays.
//!
//! ```json
//! {
//!   "original_size": [2000, 1500],
//!   "grid_size": [2, 2],
//!   "tile_size": { "tile_width": 1024, "tile_height": 1024 },
//!   "tiles": [
//!     { "index": 0, "file": "tile_000_000.png", "rect": [0, 0, 1024, 1024] }
//!   ]
//! }
//! ```

mod tiles;

pub use tiles::{load_image, read_tile_dir, save_image, tile_file_name, write_tile_dir};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilestitchError};
use crate::geom::{GridSize, ImageSize, TileRect};
use crate::tiler::{TileConfig, TileLayout};

/// File name used for the manifest inside a tile directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One tile entry in a manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    /// Row-major index of the tile.
    pub index: usize,
    /// Tile image file, relative to the manifest.
    pub file: String,
    /// Position on the original canvas.
    pub rect: TileRect,
}

/// The on-disk description of a split image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileManifest {
    pub original_size: ImageSize,
    pub grid_size: GridSize,
    /// The tile size that was requested when splitting.
    pub tile_size: TileConfig,
    pub tiles: Vec<TileEntry>,
}

impl TileManifest {
    /// Builds a manifest for `layout`, naming tiles by grid cell.
    pub fn from_layout(layout: &TileLayout, tile_size: TileConfig) -> Self {
        let cols = layout.grid_size.cols.max(1) as usize;
        let tiles = layout
            .positions
            .iter()
            .enumerate()
            .map(|(index, rect)| TileEntry {
                index,
                file: tile_file_name((index / cols) as u32, (index % cols) as u32),
                rect: *rect,
            })
            .collect();

        Self {
            original_size: layout.original_size,
            grid_size: layout.grid_size,
            tile_size,
            tiles,
        }
    }

    /// Returns the layout described by this manifest, ordered by tile index.
    pub fn to_layout(&self) -> TileLayout {
        let mut entries: Vec<&TileEntry> = self.tiles.iter().collect();
        entries.sort_by_key(|e| e.index);

        TileLayout {
            positions: entries.iter().map(|e| e.rect).collect(),
            original_size: self.original_size,
            grid_size: self.grid_size,
        }
    }
}

/// Reads a manifest from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_manifest(path: &Path) -> Result<TileManifest> {
    let file = File::open(path).map_err(TilestitchError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TilestitchError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a manifest to a JSON file.
pub fn write_manifest(path: &Path, manifest: &TileManifest) -> Result<()> {
    let file = File::create(path).map_err(TilestitchError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, manifest).map_err(|source| {
        TilestitchError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Parses a manifest from a JSON string.
pub fn from_manifest_str(json: &str) -> std::result::Result<TileManifest, serde_json::Error> {
    serde_json::from_str(json)
}

/// Fuzz-only entrypoint for manifest parsing from raw bytes.
#[cfg(feature = "fuzzing")]
pub fn from_manifest_slice(bytes: &[u8]) -> std::result::Result<TileManifest, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Serializes a manifest to a pretty-printed JSON string.
pub fn to_manifest_string(manifest: &TileManifest) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(manifest)
}
