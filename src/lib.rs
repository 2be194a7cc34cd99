//! Tilestitch: split large images into overlapping tiles and stitch them back.
//!
//! A large raster is cut into a grid of fixed-size, overlapping tiles so that
//! each tile can be handled by something with a fixed input size. The
//! processed tiles are then reassembled into one image, with a linear
//! gradient across every overlap so that independently produced tiles meet
//! without visible seams.
//!
//! # Modules
//!
//! - [`tiler`]: Tile grid planning and splitting
//! - [`stitch`]: Gradient-blended reassembly
//! - [`processor`]: The per-tile transform capability and pipeline driver
//! - [`coords`]: Conversion of positions to `(x, y, width, height)` regions
//! - [`sizing`]: Tile size suggestions from a desired grid
//! - [`validation`]: Layout checking and reporting
//! - [`manifest`]: On-disk tile directories
//! - [`error`]: Error types for tilestitch operations
//!
//! # Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use tilestitch::stitch::{assemble, AssembleConfig};
//! use tilestitch::tiler::{split, TileConfig};
//!
//! let image = RgbImage::from_fn(300, 200, |x, y| Rgb([x as u8, y as u8, 0]));
//! let tiled = split(&image, &TileConfig::new(128, 128)).unwrap();
//! let restored = assemble(&tiled.tiles, &tiled.layout, &AssembleConfig::new(16)).unwrap();
//! assert_eq!(restored, image);
//! ```

pub mod config;
pub mod coords;
pub mod error;
pub mod geom;
pub mod manifest;
pub mod processor;
pub mod sizing;
pub mod stitch;
pub mod tiler;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

pub use error::{Result, TilestitchError};
pub use processor::{process_image, Identity, TileProcessor};
pub use stitch::{assemble, AssembleConfig};
pub use tiler::{split, TileConfig, TileLayout, TiledImage};

use config::TilingConfig;
use coords::RegionFormat;
use manifest::TileManifest;

/// The tilestitch CLI application.
#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Split an image into overlapping tiles plus a manifest.
    Split(SplitArgs),
    /// Reassemble a tile directory into a single image.
    Assemble(AssembleArgs),
    /// Print tile positions as (x, y, width, height) regions.
    Coords(CoordsArgs),
    /// Suggest a tile size for an image from a desired grid.
    TileSize(TileSizeArgs),
    /// Check a manifest's layout for gaps, ordering and size problems.
    Check(CheckArgs),
}

/// Arguments for the split subcommand.
#[derive(clap::Args)]
struct SplitArgs {
    /// Image to split.
    input: PathBuf,

    /// Directory to write tiles and manifest.json into.
    out_dir: PathBuf,

    /// Tile width in pixels.
    #[arg(long)]
    tile_width: Option<u32>,

    /// Tile height in pixels.
    #[arg(long)]
    tile_height: Option<u32>,

    /// YAML file with tile_width, tile_height and padding defaults.
    #[arg(long, env = "TILESTITCH_CONFIG")]
    config: Option<PathBuf>,
}

/// Arguments for the assemble subcommand.
#[derive(clap::Args)]
struct AssembleArgs {
    /// manifest.json written by 'split'.
    manifest: PathBuf,

    /// Output image path (format from extension).
    output: PathBuf,

    /// Maximum width of the blended seam in pixels.
    #[arg(long)]
    padding: Option<u32>,

    /// YAML file with tile_width, tile_height and padding defaults.
    #[arg(long, env = "TILESTITCH_CONFIG")]
    config: Option<PathBuf>,
}

/// Arguments for the coords subcommand.
#[derive(clap::Args)]
struct CoordsArgs {
    /// JSON file: a manifest, or an array of [x1, y1, x2, y2] records.
    input: PathBuf,

    /// Output format ('text', 'json', or 'csv').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the tile-size subcommand.
#[derive(clap::Args)]
struct TileSizeArgs {
    /// Image to size tiles for.
    input: PathBuf,

    /// Tiles across the width (1-10).
    #[arg(long, default_value = "3")]
    width_factor: u32,

    /// Tiles down the height (1-10).
    #[arg(long, default_value = "3")]
    height_factor: u32,

    /// Fraction of each tile shared with its neighbour (0.05-0.95).
    #[arg(long, default_value = "0.1")]
    overlap_rate: f64,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// manifest.json to check.
    manifest: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins over `verbose`. Safe to call more than once.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tilestitch={level}").into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the tilestitch CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Split(args)) => run_split(args),
        Some(Commands::Assemble(args)) => run_assemble(args),
        Some(Commands::Coords(args)) => run_coords(args),
        Some(Commands::TileSize(args)) => run_tile_size(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("tilestitch {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Split large images into overlapping tiles and stitch them back.");
            println!();
            println!("Run 'tilestitch --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the split subcommand.
fn run_split(args: SplitArgs) -> Result<()> {
    let file_config = TilingConfig::load_or_default(args.config.as_deref())?;
    let tile_config = TileConfig::new(
        args.tile_width.unwrap_or(file_config.tile_width),
        args.tile_height.unwrap_or(file_config.tile_height),
    );

    let image = manifest::load_image(&args.input)?;
    let tiled = split(&image, &tile_config)?;
    let written = manifest::write_tile_dir(&args.out_dir, &tiled, tile_config)?;
    info!(input = %args.input.display(), "split complete");

    let grid = written.grid_size;
    println!(
        "Split {}x{} image into a {}x{} grid ({} tile(s)) in {}",
        image.width(),
        image.height(),
        grid.cols,
        grid.rows,
        written.tiles.len(),
        args.out_dir.display()
    );
    Ok(())
}

/// Execute the assemble subcommand.
fn run_assemble(args: AssembleArgs) -> Result<()> {
    let file_config = TilingConfig::load_or_default(args.config.as_deref())?;
    let assemble_config = AssembleConfig::new(args.padding.unwrap_or(file_config.padding));
    assemble_config.validate()?;

    let (tiles, layout) = manifest::read_tile_dir(&args.manifest)?;
    let image = assemble(&tiles, &layout, &assemble_config)?;
    manifest::save_image(&args.output, &image)?;
    info!(output = %args.output.display(), "assemble complete");

    println!(
        "Assembled {} tile(s) into a {}x{} image at {}",
        tiles.len(),
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

/// Reads coordinate records from a manifest or a bare JSON array.
fn read_positions(path: &Path) -> Result<Vec<Vec<i64>>> {
    let data = std::fs::read(path)?;
    let parse_err = |source| TilestitchError::ManifestParse {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_slice(&data).map_err(parse_err)?;
    if value.is_array() {
        return serde_json::from_value(value).map_err(parse_err);
    }

    let manifest: TileManifest = serde_json::from_value(value).map_err(parse_err)?;
    Ok(manifest
        .to_layout()
        .positions
        .iter()
        .map(|r| {
            let (left, top, right, bottom) = r.to_tuple();
            vec![left.into(), top.into(), right.into(), bottom.into()]
        })
        .collect())
}

/// Execute the coords subcommand.
fn run_coords(args: CoordsArgs) -> Result<()> {
    let format: RegionFormat = args.output.parse()?;
    let positions = read_positions(&args.input)?;
    let regions = coords::split_coordinates(&positions)?;

    coords::write_regions(std::io::stdout().lock(), &regions, format)
}

/// Execute the tile-size subcommand.
fn run_tile_size(args: TileSizeArgs) -> Result<()> {
    let (width, height) =
        image::image_dimensions(&args.input).map_err(|source| TilestitchError::ImageLoad {
            path: args.input.clone(),
            source,
        })?;

    let config = sizing::SizingConfig {
        width_factor: args.width_factor,
        height_factor: args.height_factor,
        overlap_rate: args.overlap_rate,
    };
    let tile = sizing::suggest_tile_size(width, height, &config)?;

    println!("tile_width: {}", tile.tile_width);
    println!("tile_height: {}", tile.tile_height);
    Ok(())
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<()> {
    let layout = manifest::read_manifest(&args.manifest)?.to_layout();

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_layout(&layout, &opts);

    match args.output.as_str() {
        "json" => {
            let json = report
                .to_json_string()
                .map_err(|source| TilestitchError::ManifestWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            println!("{}", json);
        }
        "text" => print!("{}", report),
        other => {
            return Err(TilestitchError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(TilestitchError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
