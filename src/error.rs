use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for tilestitch operations.
#[derive(Debug, Error)]
pub enum TilestitchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse tile manifest from {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write tile manifest to {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write regions as CSV: {0}")]
    RegionCsvWrite(#[source] csv::Error),

    #[error("Failed to write regions as JSON: {0}")]
    RegionJsonWrite(#[source] serde_json::Error),

    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    #[error("Coordinate group {index} must contain exactly 4 values, but got {found}")]
    CoordinateArity { index: usize, found: usize },

    #[error("Coordinate group {index} has a width or height outside the i64 range")]
    CoordinateOverflow { index: usize },

    #[error("Blend strip sizes do not match: {first:?} vs {second:?}")]
    StripSizeMismatch {
        first: (u32, u32),
        second: (u32, u32),
    },

    #[error("Tile count mismatch: grid {cols}x{rows} expects {expected}, got {tiles} tile(s) and {positions} position(s)")]
    TileCountMismatch {
        cols: u32,
        rows: u32,
        expected: usize,
        tiles: usize,
        positions: usize,
    },

    #[error("Tile {index} is {actual:?} but its position expects {expected:?}")]
    TileSizeMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Assembled canvas is {actual:?} but the original size is {expected:?}")]
    CanvasSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Layout check failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl TilestitchError {
    pub(crate) fn invalid_config(name: &str, reason: impl Into<String>) -> Self {
        TilestitchError::InvalidConfig {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by inconsistent inputs to a split or
    /// assemble call (wrong arity, mismatched tiles or strips).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TilestitchError::CoordinateArity { .. }
                | TilestitchError::CoordinateOverflow { .. }
                | TilestitchError::StripSizeMismatch { .. }
                | TilestitchError::TileCountMismatch { .. }
                | TilestitchError::TileSizeMismatch { .. }
                | TilestitchError::CanvasSizeMismatch { .. }
                | TilestitchError::ValidationFailed { .. }
        )
    }

    /// Returns true for errors raised before any work starts because a
    /// parameter is out of range.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TilestitchError::InvalidConfig { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TilestitchError>;
