//! terrain info command - display raster statistics.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use terrain_mesh::TerrainLayout;

use super::{Window, load_raster};
use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct RasterInfo {
    path: String,
    rows: usize,
    cols: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_non_finite: Option<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mesh: Option<PredictedMesh>,
}

#[derive(Serialize)]
struct PredictedMesh {
    vertices: usize,
    faces: usize,
    top_faces: usize,
    wall_faces: usize,
}

pub fn run(input: &Path, window: Option<Window>, cli: &Cli) -> Result<()> {
    let heightfield = load_raster(input, window)?;

    let mesh = TerrainLayout::new(heightfield.rows(), heightfield.cols())
        .ok()
        .map(|layout| PredictedMesh {
            vertices: layout.total_vertex_count(),
            faces: layout.total_face_count(),
            top_faces: layout.terrain_face_count(),
            wall_faces: layout.total_face_count() - 2 * layout.terrain_face_count(),
        });

    let info = RasterInfo {
        path: input.display().to_string(),
        rows: heightfield.rows(),
        cols: heightfield.cols(),
        min_elevation: heightfield.min(),
        max_elevation: heightfield.max(),
        first_non_finite: heightfield.first_non_finite().map(|(r, c, _)| [r, c]),
        mesh,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&info, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Raster Information".bold().underline());
                println!("  {}: {}", "File".cyan(), input.display());
                println!(
                    "  {}: {} rows x {} columns",
                    "Shape".cyan(),
                    info.rows,
                    info.cols
                );

                if let (Some(min), Some(max)) = (info.min_elevation, info.max_elevation) {
                    println!("  {}: {:.3} to {:.3}", "Elevation".cyan(), min, max);
                }

                if let Some([row, col]) = info.first_non_finite {
                    println!(
                        "  {}: first at row {}, column {}",
                        "Non-finite samples".yellow(),
                        row,
                        col
                    );
                }

                match &info.mesh {
                    Some(m) => {
                        println!(
                            "  {}: {} vertices, {} triangles",
                            "Solid".cyan(),
                            m.vertices,
                            m.faces
                        );
                        println!(
                            "  {}: {} top, {} base, {} walls",
                            "Triangles".cyan(),
                            m.top_faces,
                            m.top_faces,
                            m.wall_faces
                        );
                    }
                    None => println!(
                        "  {}: {}",
                        "Solid".cyan(),
                        "raster too small to mesh".red()
                    ),
                }
            }
        }
    }

    Ok(())
}
