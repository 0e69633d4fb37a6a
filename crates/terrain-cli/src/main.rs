//! terrain-cli: Command-line interface for turning elevation rasters into
//! printable solids.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=terrain_mesh=info` - Build summaries and files written
//! - `RUST_LOG=terrain_mesh=debug` - Per-stage counts and bounds
//! - `RUST_LOG=terrain_mesh::timing=info` - Stage timing
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Convert a GeoTIFF with 30 m pixels and a 100 m base
//! terrain convert dem.tif -o dem.stl -x 30 -y 30 -b 100
//!
//! # Inspect a raster without building
//! terrain info dem.tif --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
mod raster;

use commands::{MeshArgs, Window, convert, info, validate};

/// terrain - Turn elevation rasters into closed, printable STL solids.
#[derive(Parser)]
#[command(name = "terrain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raster into a closed mesh
    Convert {
        /// Input raster (PNG or TIFF)
        input: PathBuf,

        /// Output file path (defaults to <input>.stl; format from extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write ASCII instead of binary STL (requires an .stl output)
        #[arg(long)]
        ascii: bool,

        #[command(flatten)]
        mesh: MeshArgs,
    },

    /// Display raster statistics and the predicted mesh size
    Info {
        /// Input raster (PNG or TIFF)
        input: PathBuf,

        /// Inspect only a ROW,COL,ROWS,COLS sub-raster
        #[arg(long, value_parser = commands::parse_window)]
        window: Option<Window>,
    },

    /// Build the mesh and check it is closed and outward-facing
    Validate {
        /// Input raster (PNG or TIFF)
        input: PathBuf,

        #[command(flatten)]
        mesh: MeshArgs,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "terrain_mesh=info,terrain=info",
            2 => "terrain_mesh=debug,terrain=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Convert {
            input,
            output,
            ascii,
            mesh,
        } => convert::run(input, output.as_deref(), *ascii, mesh, &cli),
        Commands::Info { input, window } => info::run(input, *window, &cli),
        Commands::Validate { input, mesh } => validate::run(input, mesh, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(terrain_err) = e.downcast_ref::<terrain_mesh::TerrainError>() {
                eprintln!("{}: {}", "Error".red().bold(), terrain_err);
                eprintln!("  {}: {}", "Code".cyan(), terrain_err.code());
                eprintln!(
                    "  {}: {}",
                    "Suggestion".green(),
                    terrain_err.recovery_suggestion()
                );
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
