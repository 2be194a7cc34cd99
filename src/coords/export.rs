//! Text, JSON and CSV renderings of region lists.

use std::io::Write;
use std::str::FromStr;

use crate::error::{Result, TilestitchError};
use crate::geom::Region;

/// Output format for a list of regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RegionFormat {
    /// One `(x, y, width, height)` tuple per line.
    #[default]
    Text,
    /// A JSON array of `{x, y, width, height}` objects.
    Json,
    /// CSV with an `x,y,width,height` header.
    Csv,
}

impl FromStr for RegionFormat {
    type Err = TilestitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(RegionFormat::Text),
            "json" => Ok(RegionFormat::Json),
            "csv" => Ok(RegionFormat::Csv),
            other => Err(TilestitchError::UnsupportedFormat(format!(
                "'{}' (supported: text, json, csv)",
                other
            ))),
        }
    }
}

/// Renders regions as CSV.
pub fn to_csv_string(regions: &[Region]) -> Result<String> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());
    for region in regions {
        csv_writer
            .serialize(region)
            .map_err(TilestitchError::RegionCsvWrite)?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| TilestitchError::Io(e.into_error()))?;

    String::from_utf8(bytes)
        .map_err(|e| TilestitchError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Renders regions as pretty-printed JSON.
pub fn to_json_string(regions: &[Region]) -> Result<String> {
    serde_json::to_string_pretty(regions).map_err(TilestitchError::RegionJsonWrite)
}

/// Writes regions to `writer` in the requested format.
pub fn write_regions<W: Write>(mut writer: W, regions: &[Region], format: RegionFormat) -> Result<()> {
    match format {
        RegionFormat::Text => {
            for region in regions {
                writeln!(writer, "{}", region)?;
            }
        }
        RegionFormat::Json => writeln!(writer, "{}", to_json_string(regions)?)?,
        RegionFormat::Csv => write!(writer, "{}", to_csv_string(regions)?)?,
    }
    Ok(())
}
