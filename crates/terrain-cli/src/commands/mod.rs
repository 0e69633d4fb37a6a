//! Subcommands and the arguments they share.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use terrain_mesh::{Heightfield, TerrainParams};

use crate::raster;

pub mod convert;
pub mod info;
pub mod validate;

/// A `ROW,COL,ROWS,COLS` sub-raster selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Parse `ROW,COL,ROWS,COLS`.
pub fn parse_window(s: &str) -> Result<Window, String> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid window {:?}: {}", s, e))?;

    match parts[..] {
        [row, col, rows, cols] => Ok(Window {
            row,
            col,
            rows,
            cols,
        }),
        _ => Err(format!(
            "invalid window {:?}: expected ROW,COL,ROWS,COLS",
            s
        )),
    }
}

/// Meshing options shared by `convert` and `validate`.
#[derive(Args, Debug, Clone)]
pub struct MeshArgs {
    /// Distance between raster columns
    #[arg(long, short = 'x', default_value = "1.0")]
    pub xscale: f64,

    /// Distance between raster rows
    #[arg(long, short = 'y', default_value = "1.0")]
    pub yscale: f64,

    /// Elevation multiplier
    #[arg(long, short = 'z', default_value = "1.0")]
    pub zscale: f64,

    /// Depth of the base below the lowest sample
    #[arg(long, short = 'b', default_value = "0.0")]
    pub box_height: f64,

    /// Fail on NaN or infinite samples
    #[arg(long)]
    pub reject_non_finite: bool,

    /// Mesh only a ROW,COL,ROWS,COLS sub-raster
    #[arg(long, value_parser = parse_window)]
    pub window: Option<Window>,
}

impl MeshArgs {
    pub fn params(&self) -> TerrainParams {
        TerrainParams {
            xscale: self.xscale,
            yscale: self.yscale,
            zscale: self.zscale,
            box_height: self.box_height,
            reject_non_finite: self.reject_non_finite,
            ..TerrainParams::default()
        }
    }
}

/// Decode a raster and crop it to `window` if given.
pub fn load_raster(input: &Path, window: Option<Window>) -> Result<Heightfield> {
    let heightfield = raster::load(input)?;
    match window {
        Some(w) => heightfield
            .window(w.row, w.col, w.rows, w.cols)
            .with_context(|| format!("Failed to crop {:?}", input)),
        None => Ok(heightfield),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        assert_eq!(
            parse_window("10, 20,30,40").unwrap(),
            Window {
                row: 10,
                col: 20,
                rows: 30,
                cols: 40
            }
        );
        assert!(parse_window("1,2,3").is_err());
        assert!(parse_window("1,2,3,x").is_err());
        assert!(parse_window("1,2,3,4,5").is_err());
    }

    #[test]
    fn test_default_params() {
        let args = MeshArgs {
            xscale: 1.0,
            yscale: 1.0,
            zscale: 1.0,
            box_height: 0.0,
            reject_non_finite: false,
            window: None,
        };
        assert_eq!(args.params(), TerrainParams::default());
    }
}
