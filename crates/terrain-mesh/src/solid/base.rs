//! Flat base under the terrain.

use tracing::{debug, warn};

use super::grid::VertexGrid;
use super::top::TopSurface;
use crate::Vertex;

/// Flattened copy of the terrain closing the solid from below.
///
/// Holding a `BaseSurface` is what allows wall ribbons to be generated: the
/// walls index into the base vertices through [`BaseSurface::offset`].
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSurface {
    floor_z: f64,
    offset: u32,
    vertices: Vec<Vertex>,
    faces: Vec<[u32; 3]>,
}

impl BaseSurface {
    /// Build the base from the terrain grid and its top surface.
    ///
    /// The floor sits `box_height` below the lowest terrain vertex. Every
    /// terrain vertex is copied at that elevation, and every top face is
    /// copied with indices shifted into the base range and reversed so the
    /// copy faces -Z.
    pub fn build(grid: &VertexGrid, top: &TopSurface, box_height: f64) -> Self {
        let layout = grid.layout();
        let offset = layout.base_offset();

        let lowest = grid.min_z();
        if !lowest.is_finite() {
            warn!("Terrain has no finite elevation; base floor is {}", lowest);
        }
        let floor_z = lowest - box_height;

        let vertices: Vec<Vertex> = grid.vertices().iter().map(|v| v.with_z(floor_z)).collect();

        let faces: Vec<[u32; 3]> = top
            .faces()
            .iter()
            .map(|&[a, b, c]| [c + offset, b + offset, a + offset])
            .collect();

        debug!(
            "Base: floor at z={:.4}, {} vertices, {} triangles",
            floor_z,
            vertices.len(),
            faces.len()
        );

        Self {
            floor_z,
            offset,
            vertices,
            faces,
        }
    }

    /// Elevation of the floor.
    #[inline]
    pub fn floor_z(&self) -> f64 {
        self.floor_z
    }

    /// Index of the first base vertex; terrain vertex `i` pairs with `i + offset`.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub(crate) fn into_parts(self) -> (Vec<Vertex>, Vec<[u32; 3]>) {
        (self.vertices, self.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::Heightfield;
    use crate::params::TerrainParams;
    use crate::solid::layout::TerrainLayout;

    fn build(rows: &[[f64; 2]], box_height: f64) -> (VertexGrid, TopSurface, BaseSurface) {
        let hf = Heightfield::from_rows(rows).unwrap();
        let layout = TerrainLayout::new(hf.rows(), hf.cols()).unwrap();
        let grid = VertexGrid::build(&hf, layout, &TerrainParams::default());
        let top = TopSurface::triangulate(&layout);
        let base = BaseSurface::build(&grid, &top, box_height);
        (grid, top, base)
    }

    #[test]
    fn test_floor_below_lowest_sample() {
        let (_, _, base) = build(&[[1.0, 0.0], [0.0, 0.0]], 1.0);
        assert_eq!(base.floor_z(), -1.0);
        assert!(base.vertices().iter().all(|v| v.position.z == -1.0));
    }

    #[test]
    fn test_base_keeps_xy() {
        let (grid, _, base) = build(&[[3.0, 4.0], [5.0, 6.0]], 0.0);
        assert_eq!(base.floor_z(), 3.0);
        for (t, b) in grid.vertices().iter().zip(base.vertices()) {
            assert_eq!(t.position.x, b.position.x);
            assert_eq!(t.position.y, b.position.y);
        }
    }

    #[test]
    fn test_faces_are_offset_and_reversed() {
        let (_, top, base) = build(&[[0.0, 0.0], [0.0, 0.0]], 0.0);
        assert_eq!(base.offset(), 4);
        assert_eq!(base.faces().len(), top.faces().len());
        for (t, b) in top.faces().iter().zip(base.faces()) {
            assert_eq!(*b, [t[2] + 4, t[1] + 4, t[0] + 4]);
        }
    }
}
