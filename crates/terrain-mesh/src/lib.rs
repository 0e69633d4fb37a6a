//! Closed triangle solids from elevation rasters.
//!
//! This crate turns a 2D grid of elevation samples into a watertight,
//! manifold triangle mesh ready for STL export: a terrain surface on top, a
//! flat base underneath, and four vertical walls joining them.
//!
//! # Features
//!
//! - **Meshing**: One vertex per sample, two triangles per grid cell, a
//!   reversed copy of the terrain flattened into a base, and perimeter walls
//! - **Validation**: Boundary and non-manifold edges, directed-edge
//!   orientation, signed volume, outward-facing wall check
//! - **Output**: Binary and ASCII STL, OBJ
//!
//! # Coordinate System
//!
//! Raster sample `(row, col)` with elevation `v` is placed at
//!
//! ```text
//! (col * xscale, (1 - row) * yscale, v * zscale)
//! ```
//!
//! so row 0 sits at the largest Y and rows advance toward -Y. Face winding
//! is **counter-clockwise when viewed from outside** the solid.
//!
//! # Quick Start
//!
//! ```no_run
//! use terrain_mesh::{Heightfield, TerrainBuilder};
//!
//! let hf = Heightfield::from_rows(&[
//!     [0.0, 1.0, 2.0],
//!     [1.0, 2.0, 3.0],
//!     [2.0, 3.0, 4.0],
//! ])
//! .unwrap();
//!
//! let solid = TerrainBuilder::new(&hf)
//!     .xscale(10.0)
//!     .yscale(10.0)
//!     .box_height(5.0)
//!     .build()
//!     .unwrap();
//!
//! let report = solid.validate();
//! assert!(report.is_printable());
//!
//! solid.save("terrain.stl").unwrap();
//! ```
//!
//! # Mesh Layout
//!
//! For an `R x C` raster the solid has `2*R*C` vertices (terrain first, then
//! base) and `4*(R-1)*(C-1) + 4*(C-1) + 4*(R-1)` triangles, ordered top,
//! base, north, south, west, east. See [`TerrainLayout`] and
//! [`TerrainMesh::face_range`].

mod builder;
mod error;
mod heightfield;
mod params;
pub mod tracing_ext;
mod types;

pub mod adjacency;
pub mod io;
pub mod observer;
pub mod solid;
pub mod validate;

// Re-export core types at crate root
pub use error::{ErrorCode, RecoverySuggestion, TerrainError, TerrainResult};
pub use heightfield::Heightfield;
pub use params::{DEFAULT_MAX_VERTICES, TerrainParams};
pub use types::{Mesh, Triangle, Vertex};

pub use adjacency::MeshAdjacency;

// Builder API
pub use builder::{TerrainBuilder, build_terrain_mesh};
pub use observer::{BuildEvent, BuildObserver, BuildStage, EventLevel};

pub use io::{MeshFormat, save_mesh, save_obj, save_stl, save_stl_ascii};
pub use solid::{Surface, TerrainLayout, TerrainMesh, WallSide};
pub use validate::{
    MeshReport, WallCheck, WallNormalReport, log_validation, validate_mesh, verify_wall_normals,
};

pub use tracing_ext::{OperationTimer, log_mesh_stats};

// Convenience methods on Mesh
impl Mesh {
    /// Save the mesh to a file, auto-detecting format from extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> TerrainResult<()> {
        io::save_mesh(self, path.as_ref())
    }

    /// Validate the mesh and return a report of any issues.
    pub fn validate(&self) -> MeshReport {
        validate::validate_mesh(self)
    }
}

// Convenience methods on TerrainMesh
impl TerrainMesh {
    /// Save the solid, auto-detecting format from extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> TerrainResult<()> {
        self.mesh().save(path)
    }

    /// Validate the assembled mesh.
    pub fn validate(&self) -> MeshReport {
        self.mesh().validate()
    }

    /// Check that every wall faces away from the solid.
    pub fn verify_wall_normals(&self) -> WallNormalReport {
        validate::verify_wall_normals(self)
    }
}
