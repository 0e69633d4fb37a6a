//! Mesh validation and reporting.

use nalgebra::Point3;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::Mesh;
use crate::adjacency::MeshAdjacency;
use crate::solid::{Surface, TerrainMesh, WallSide};

/// Minimum alignment between a wall normal and its outward axis.
const WALL_ALIGNMENT_EPS: f64 = 1e-9;

/// Validation report for a mesh.
#[derive(Debug, Clone, Serialize)]
pub struct MeshReport {
    /// Whether the mesh has no boundary edges.
    pub is_watertight: bool,

    /// Whether all edges have at most 2 adjacent faces.
    pub is_manifold: bool,

    /// Whether every directed edge is paired with its reverse.
    pub is_consistently_oriented: bool,

    /// Number of boundary edges (edges with 1 adjacent face).
    pub boundary_edge_count: usize,

    /// Number of non-manifold edges (edges with >2 adjacent faces).
    pub non_manifold_edge_count: usize,

    /// Number of directed edges that break orientation pairing.
    pub misoriented_edge_count: usize,

    /// Face indices referring past the vertex buffer.
    pub invalid_index_count: usize,

    pub vertex_count: usize,
    pub face_count: usize,

    /// Bounding box as (min_corner, max_corner).
    #[serde(skip)]
    pub bounds: Option<(Point3<f64>, Point3<f64>)>,

    /// Dimensions (x, y, z).
    pub dimensions: Option<(f64, f64, f64)>,

    /// Signed volume (positive = outward normals).
    /// Only meaningful for closed meshes.
    pub signed_volume: f64,

    pub volume: f64,

    pub surface_area: f64,

    /// Negative signed volume.
    pub is_inside_out: bool,

    /// Number of edge-connected components.
    pub component_count: usize,
}

impl MeshReport {
    /// Check if mesh passes basic validity checks.
    pub fn is_valid(&self) -> bool {
        self.vertex_count > 0 && self.face_count > 0 && self.invalid_index_count == 0
    }

    /// Closed, manifold, consistently wound and facing outward.
    pub fn is_printable(&self) -> bool {
        self.is_valid()
            && self.is_watertight
            && self.is_manifold
            && self.is_consistently_oriented
            && !self.is_inside_out
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Components: {}", self.component_count)?;

        if let Some((min, max)) = &self.bounds {
            writeln!(
                f,
                "  Bounds: [{:.1}, {:.1}, {:.1}] to [{:.1}, {:.1}, {:.1}]",
                min.x, min.y, min.z, max.x, max.y, max.z
            )?;
        }

        if let Some((dx, dy, dz)) = &self.dimensions {
            writeln!(f, "  Dimensions: {:.1} x {:.1} x {:.1}", dx, dy, dz)?;
        }

        writeln!(f, "  Surface Area: {:.2}", self.surface_area)?;
        writeln!(
            f,
            "  Volume: {:.2} (signed: {:.2})",
            self.volume, self.signed_volume
        )?;

        if self.invalid_index_count > 0 {
            writeln!(f, "  Invalid indices: {}", self.invalid_index_count)?;
        }

        writeln!(
            f,
            "  Watertight: {} (boundary edges: {})",
            if self.is_watertight { "yes" } else { "NO" },
            self.boundary_edge_count
        )?;

        writeln!(
            f,
            "  Manifold: {} (non-manifold edges: {})",
            if self.is_manifold { "yes" } else { "NO" },
            self.non_manifold_edge_count
        )?;

        writeln!(
            f,
            "  Orientation: {} (misoriented edges: {})",
            if !self.is_consistently_oriented {
                "INCONSISTENT"
            } else if self.is_inside_out {
                "INSIDE-OUT"
            } else {
                "correct"
            },
            self.misoriented_edge_count
        )?;

        writeln!(
            f,
            "  Printable: {}",
            if self.is_printable() { "yes" } else { "NO" }
        )?;

        Ok(())
    }
}

/// Validate a mesh and return a report.
pub fn validate_mesh(mesh: &Mesh) -> MeshReport {
    let vertex_count = mesh.vertex_count();
    let invalid_index_count = mesh
        .faces
        .iter()
        .flatten()
        .filter(|&&idx| idx as usize >= vertex_count)
        .count();

    let adjacency = MeshAdjacency::build(&mesh.faces);
    let boundary_edge_count = adjacency.boundary_edge_count();
    let non_manifold_edge_count = adjacency.non_manifold_edge_count();
    let misoriented_edge_count = adjacency.misoriented_edge_count();

    let bounds = mesh.bounds();
    let dimensions = bounds.map(|(min, max)| (max.x - min.x, max.y - min.y, max.z - min.z));

    // Geometry needs every index to resolve.
    let (signed_volume, surface_area) = if invalid_index_count == 0 {
        (mesh.signed_volume(), mesh.surface_area())
    } else {
        (0.0, 0.0)
    };

    let report = MeshReport {
        is_watertight: boundary_edge_count == 0,
        is_manifold: non_manifold_edge_count == 0,
        is_consistently_oriented: misoriented_edge_count == 0,
        boundary_edge_count,
        non_manifold_edge_count,
        misoriented_edge_count,
        invalid_index_count,
        vertex_count,
        face_count: mesh.face_count(),
        bounds,
        dimensions,
        signed_volume,
        volume: signed_volume.abs(),
        surface_area,
        is_inside_out: signed_volume < 0.0,
        component_count: adjacency.component_count(mesh.face_count()),
    };

    if invalid_index_count > 0 {
        warn!("Mesh has {} out-of-range face indices", invalid_index_count);
    }

    if !report.is_watertight {
        warn!(
            "Mesh is not watertight: {} boundary edges",
            boundary_edge_count
        );
    }

    if !report.is_manifold {
        warn!(
            "Mesh is not manifold: {} non-manifold edges",
            non_manifold_edge_count
        );
    }

    if !report.is_consistently_oriented {
        warn!(
            "Mesh winding is inconsistent: {} misoriented edges",
            misoriented_edge_count
        );
    } else if report.is_inside_out && report.is_watertight {
        warn!("Mesh appears to be inside-out (negative signed volume)");
    }

    debug!("{}", report);

    report
}

/// Log a summary of mesh validation.
pub fn log_validation(report: &MeshReport) {
    let dims = report
        .dimensions
        .map(|(x, y, z)| format!("{:.1}x{:.1}x{:.1}", x, y, z))
        .unwrap_or_default();
    info!(
        "Mesh: {} verts, {} faces, {}",
        report.vertex_count, report.face_count, dims
    );

    if report.is_printable() {
        info!("Mesh is watertight and manifold (printable)");
    } else {
        if !report.is_watertight {
            warn!(
                "Not watertight: {} boundary edges",
                report.boundary_edge_count
            );
        }
        if !report.is_manifold {
            warn!(
                "Not manifold: {} non-manifold edges",
                report.non_manifold_edge_count
            );
        }
        if !report.is_consistently_oriented {
            warn!(
                "Inconsistent winding: {} misoriented edges",
                report.misoriented_edge_count
            );
        }
    }
}

/// Outward-facing check for one wall.
#[derive(Debug, Clone, Serialize)]
pub struct WallCheck {
    pub side: WallSide,
    pub face_count: usize,
    /// Faces whose normal points into the solid.
    pub inverted: Vec<usize>,
    /// Zero-area faces, which have no normal to check.
    pub degenerate: usize,
}

impl WallCheck {
    pub fn is_ok(&self) -> bool {
        self.inverted.is_empty()
    }
}

/// Result of [`verify_wall_normals`].
#[derive(Debug, Clone, Serialize)]
pub struct WallNormalReport {
    pub walls: Vec<WallCheck>,
}

impl WallNormalReport {
    /// No wall has an inverted face.
    pub fn is_ok(&self) -> bool {
        self.walls.iter().all(WallCheck::is_ok)
    }

    /// Inverted faces across all walls.
    pub fn inverted_count(&self) -> usize {
        self.walls.iter().map(|w| w.inverted.len()).sum()
    }

    pub fn degenerate_count(&self) -> usize {
        self.walls.iter().map(|w| w.degenerate).sum()
    }
}

impl std::fmt::Display for WallNormalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wall Normals:")?;
        for wall in &self.walls {
            writeln!(
                f,
                "  {}: {} faces, {} inverted, {} degenerate",
                wall.side,
                wall.face_count,
                wall.inverted.len(),
                wall.degenerate
            )?;
        }
        Ok(())
    }
}

/// Check that every wall triangle faces away from the solid.
///
/// Inverted face indices are reported relative to the whole mesh.
pub fn verify_wall_normals(solid: &TerrainMesh) -> WallNormalReport {
    let mesh = solid.mesh();
    let walls = WallSide::ALL
        .iter()
        .map(|&side| {
            let range = solid.face_range(Surface::Wall(side));
            let outward = side.outward();
            let mut check = WallCheck {
                side,
                face_count: range.len(),
                inverted: Vec::new(),
                degenerate: 0,
            };

            for face_idx in range {
                match mesh.triangle(face_idx).and_then(|t| t.normal()) {
                    Some(normal) if normal.dot(&outward) > WALL_ALIGNMENT_EPS => {}
                    Some(_) => check.inverted.push(face_idx),
                    None => check.degenerate += 1,
                }
            }

            if !check.is_ok() {
                warn!(
                    "{}: {} of {} faces point inward",
                    side,
                    check.inverted.len(),
                    check.face_count
                );
            }
            check
        })
        .collect();

    WallNormalReport { walls }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::Heightfield;
    use crate::params::TerrainParams;
    use crate::{TerrainBuilder, Vertex, build_terrain_mesh};

    fn unit_tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]];
        mesh
    }

    #[test]
    fn test_tetrahedron_is_printable() {
        let report = validate_mesh(&unit_tetrahedron());
        assert!(report.is_printable(), "{}", report);
        assert_eq!(report.component_count, 1);
        assert!((report.volume - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut mesh = unit_tetrahedron();
        mesh.faces.push([0, 1, 9]);
        let report = validate_mesh(&mesh);
        assert_eq!(report.invalid_index_count, 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_inverted_mesh_reported() {
        let mut mesh = unit_tetrahedron();
        for face in &mut mesh.faces {
            face.swap(1, 2);
        }
        let report = validate_mesh(&mesh);
        assert!(report.is_consistently_oriented);
        assert!(report.is_inside_out);
        assert!(!report.is_printable());
    }

    #[test]
    fn test_terrain_walls_face_outward() {
        let hf = Heightfield::from_fn(4, 5, |r, c| (r as f64).sin() + c as f64 * 0.3);
        let params = TerrainParams {
            box_height: 1.0,
            ..Default::default()
        };
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let report = verify_wall_normals(&solid);
        assert!(report.is_ok(), "{}", report);
        assert_eq!(report.degenerate_count(), 0);
        assert_eq!(report.walls.len(), 4);
    }

    #[test]
    fn test_small_scale_walls_are_checked() {
        let hf = Heightfield::from_fn(3, 3, |r, c| (r * 3 + c) as f64);
        let solid = TerrainBuilder::new(&hf)
            .xscale(1e-5)
            .yscale(1e-5)
            .zscale(1e-5)
            .box_height(1e-5)
            .build()
            .unwrap();
        let report = verify_wall_normals(&solid);
        assert!(report.is_ok(), "{}", report);
        assert_eq!(report.degenerate_count(), 0);
        assert_eq!(report.inverted_count(), 0);
    }

    #[test]
    fn test_small_scale_inverted_wall_detected() {
        let hf = Heightfield::from_fn(3, 3, |r, c| (r * 3 + c) as f64);
        let mut solid = TerrainBuilder::new(&hf)
            .xscale(1e-5)
            .yscale(1e-5)
            .zscale(1e-5)
            .box_height(1e-5)
            .build()
            .unwrap();
        let range = solid.face_range(Surface::Wall(WallSide::East));
        let first = range.start;
        solid.mesh_mut().faces[first].swap(1, 2);
        let report = verify_wall_normals(&solid);
        assert!(!report.is_ok());
        assert_eq!(report.inverted_count(), 1);
    }

    #[test]
    fn test_flat_zero_height_walls_are_degenerate() {
        let hf = Heightfield::from_fn(3, 3, |_, _| 0.0);
        let solid = build_terrain_mesh(&hf, &TerrainParams::default()).unwrap();
        let report = verify_wall_normals(&solid);
        assert!(report.is_ok());
        assert_eq!(report.degenerate_count(), 16);
    }
}
