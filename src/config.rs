//! File-based defaults for the split and assemble operations.
//!
//! A YAML file may set any subset of the fields; missing fields keep their
//! defaults.
//!
//! ```yaml
//! tile_width: 768
//! tile_height: 768
//! padding: 32
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilestitchError};
use crate::stitch::{AssembleConfig, DEFAULT_PADDING};
use crate::tiler::{TileConfig, DEFAULT_TILE_SIZE};

/// Combined tiling and stitching settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilingConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    pub padding: u32,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            padding: DEFAULT_PADDING,
        }
    }
}

impl TilingConfig {
    /// Loads a config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: TilingConfig =
            serde_yaml::from_str(&data).map_err(|source| TilestitchError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn tile_config(&self) -> TileConfig {
        TileConfig::new(self.tile_width, self.tile_height)
    }

    pub fn assemble_config(&self) -> AssembleConfig {
        AssembleConfig::new(self.padding)
    }

    /// Validates every field.
    pub fn validate(&self) -> Result<()> {
        self.tile_config().validate()?;
        self.assemble_config().validate()
    }
}
