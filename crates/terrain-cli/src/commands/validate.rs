//! terrain validate command - build a solid and check it.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use terrain_mesh::{MeshReport, WallNormalReport, build_terrain_mesh};

use super::{MeshArgs, load_raster};
use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct ValidationResult {
    path: String,
    valid: bool,
    issues: Vec<IssueInfo>,
    report: MeshReport,
    walls: WallNormalReport,
}

#[derive(Serialize)]
struct IssueInfo {
    category: String,
    message: String,
    severity: String,
}

fn collect_issues(report: &MeshReport, walls: &WallNormalReport) -> Vec<IssueInfo> {
    let mut issues = Vec::new();
    let mut push = |category: &str, message: String, severity: &str| {
        issues.push(IssueInfo {
            category: category.to_string(),
            message,
            severity: severity.to_string(),
        })
    };

    if report.invalid_index_count > 0 {
        push(
            "indices",
            format!("{} face indices out of range", report.invalid_index_count),
            "error",
        );
    }

    if !report.is_watertight {
        push(
            "topology",
            format!(
                "Mesh is not watertight ({} boundary edges)",
                report.boundary_edge_count
            ),
            "error",
        );
    }

    if !report.is_manifold {
        push(
            "topology",
            format!(
                "Mesh is not manifold ({} non-manifold edges)",
                report.non_manifold_edge_count
            ),
            "error",
        );
    }

    if !report.is_consistently_oriented {
        push(
            "winding",
            format!(
                "Inconsistent winding ({} misoriented edges)",
                report.misoriented_edge_count
            ),
            "error",
        );
    } else if report.is_inside_out {
        push(
            "winding",
            "Mesh appears to be inside-out".to_string(),
            "warning",
        );
    }

    for wall in &walls.walls {
        if !wall.is_ok() {
            push(
                "walls",
                format!(
                    "{}: {} of {} faces point inward",
                    wall.side,
                    wall.inverted.len(),
                    wall.face_count
                ),
                "error",
            );
        }
        if wall.degenerate > 0 {
            push(
                "walls",
                format!("{}: {} zero-area faces", wall.side, wall.degenerate),
                "info",
            );
        }
    }

    issues
}

pub fn run(input: &Path, args: &MeshArgs, cli: &Cli) -> Result<()> {
    let heightfield = load_raster(input, args.window)?;
    let solid = build_terrain_mesh(&heightfield, &args.params())
        .with_context(|| format!("Failed to mesh {:?}", input))?;

    let report = solid.validate();
    let walls = solid.verify_wall_normals();
    let issues = collect_issues(&report, &walls);
    let valid = issues.iter().all(|i| i.severity != "error");

    let result = ValidationResult {
        path: input.display().to_string(),
        valid,
        issues,
        report,
        walls,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Validation Report".bold().underline());
                println!("  {}: {}", "File".cyan(), input.display());

                if result.valid {
                    println!("  {}: {}", "Status".cyan(), "Valid".green().bold());
                } else {
                    println!("  {}: {}", "Status".cyan(), "Issues found".red().bold());
                }

                if !result.issues.is_empty() {
                    println!("\n{}", "Issues:".bold());
                    for issue in &result.issues {
                        let icon = match issue.severity.as_str() {
                            "error" => "✗".red(),
                            "warning" => "⚠".yellow(),
                            _ => "ℹ".blue(),
                        };
                        println!("  {} [{}] {}", icon, issue.category, issue.message);
                    }
                }

                println!();
                print!("{}", result.report);
                print!("{}", result.walls);
            }
        }
    }

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_mesh::{Heightfield, TerrainParams};

    #[test]
    fn test_valid_solid_has_no_errors() {
        let hf = Heightfield::from_fn(4, 4, |r, c| (r * c) as f64);
        let params = TerrainParams {
            box_height: 1.0,
            ..Default::default()
        };
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let issues = collect_issues(&solid.validate(), &solid.verify_wall_normals());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_flat_zero_height_reports_degenerate_walls() {
        let hf = Heightfield::from_fn(2, 2, |_, _| 0.0);
        let solid = build_terrain_mesh(&hf, &TerrainParams::default()).unwrap();
        let issues = collect_issues(&solid.validate(), &solid.verify_wall_normals());
        assert!(issues.iter().all(|i| i.severity != "error"));
        assert_eq!(issues.iter().filter(|i| i.category == "walls").count(), 4);
    }
}
