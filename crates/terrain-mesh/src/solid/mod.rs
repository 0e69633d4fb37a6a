//! Heightfield-to-solid meshing.
//!
//! The solid is generated in stages, each consuming the previous stage's
//! output:
//!
//! 1. [`VertexGrid`] - one terrain vertex per raster sample
//! 2. [`TopSurface`] - two triangles per grid cell
//! 3. [`BaseSurface`] - flattened vertex copy and reversed face copy
//! 4. [`WallRibbon`] - one skirt per raster edge, indexing terrain and base
//! 5. [`TerrainMesh`] - concatenation into a single indexed mesh
//!
//! The stage types encode the ordering: a base needs a top surface, and a
//! wall needs a base. [`crate::TerrainBuilder`] runs the whole sequence.

mod assemble;
mod base;
mod grid;
mod layout;
mod top;
mod walls;

pub use assemble::TerrainMesh;
pub use base::BaseSurface;
pub use grid::VertexGrid;
pub use layout::{Surface, TerrainLayout, WallSide};
pub use top::TopSurface;
pub use walls::WallRibbon;
