//! terrain convert command - build a solid and write it to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde::Serialize;
use terrain_mesh::observer::{BuildEvent, CallbackObserver, EventLevel};
use terrain_mesh::{MeshFormat, TerrainBuilder, TerrainParams, save_stl_ascii};

use super::{MeshArgs, load_raster};
use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct ConvertResult {
    input: String,
    output: String,
    format: String,
    rows: usize,
    cols: usize,
    vertices: usize,
    faces: usize,
    floor_z: f64,
    params: TerrainParams,
}

/// `<input>.stl`, keeping the input's full file name.
fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".stl");
    PathBuf::from(name)
}

/// `--ascii` selects the STL encoding, so it needs an `.stl` output.
fn check_ascii(output_path: &Path, ascii: bool) -> Result<()> {
    if ascii && MeshFormat::from_path(output_path) != Some(MeshFormat::Stl) {
        bail!(
            "--ascii only applies to STL output, but {:?} is not an .stl path",
            output_path
        );
    }
    Ok(())
}

pub fn run(
    input: &Path,
    output_path: Option<&Path>,
    ascii: bool,
    args: &MeshArgs,
    cli: &Cli,
) -> Result<()> {
    let output_path = output_path.map_or_else(|| default_output(input), Path::to_path_buf);
    check_ascii(&output_path, ascii)?;

    if !cli.quiet && matches!(cli.format, OutputFormat::Text) {
        println!("{} -> {}", input.display(), output_path.display());
    }

    let heightfield = load_raster(input, args.window)?;
    let params = args.params();

    let show_stages = cli.verbose > 0 && !cli.quiet && matches!(cli.format, OutputFormat::Text);
    let mut observer = CallbackObserver::new(EventLevel::Verbose, |event: &BuildEvent| {
        eprintln!(
            "  {} {} ({:.1} ms)",
            "·".dimmed(),
            event.message,
            event.elapsed.as_secs_f64() * 1000.0
        );
    });

    let mut builder = TerrainBuilder::new(&heightfield).params(params);
    if show_stages {
        builder = builder.with_observer(&mut observer);
    }
    let solid = builder
        .build()
        .with_context(|| format!("Failed to mesh {:?}", input))?;

    let format = MeshFormat::from_path(&output_path);
    let format_name = match (format, ascii) {
        (Some(MeshFormat::Stl), true) => {
            save_stl_ascii(solid.mesh(), &output_path)
                .with_context(|| format!("Failed to save mesh to {:?}", output_path))?;
            "stl (ascii)"
        }
        _ => {
            solid
                .save(&output_path)
                .with_context(|| format!("Failed to save mesh to {:?}", output_path))?;
            match format {
                Some(MeshFormat::Obj) => "obj",
                _ => "stl",
            }
        }
    };

    let mesh = solid.mesh();
    let result = ConvertResult {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        format: format_name.to_string(),
        rows: heightfield.rows(),
        cols: heightfield.cols(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        floor_z: solid.floor_z(),
        params,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!("Wrote {}", output_path.display()),
                    cli.format,
                    cli.quiet,
                );
                println!(
                    "  {}: {} x {} samples",
                    "Raster".cyan(),
                    result.rows,
                    result.cols
                );
                println!(
                    "  {}: {} vertices, {} triangles",
                    "Mesh".cyan(),
                    result.vertices,
                    result.faces
                );
                println!("  {}: z = {:.3}", "Base".cyan(), result.floor_z);
                println!("  {}: {}", "Format".cyan(), result.format.to_uppercase());
            }
        }
    }

    Ok(())
}
