//! Concatenation of the generated surfaces into one solid.

use std::ops::Range;

use tracing::debug;

use super::base::BaseSurface;
use super::grid::VertexGrid;
use super::layout::{Surface, TerrainLayout, WallSide};
use super::top::TopSurface;
use super::walls::WallRibbon;
use crate::Mesh;

/// A closed terrain solid and the bookkeeping needed to inspect its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    mesh: Mesh,
    layout: TerrainLayout,
    floor_z: f64,
    ranges: [Range<usize>; 6],
}

impl TerrainMesh {
    /// Concatenate the surfaces.
    ///
    /// Vertices: terrain then base. Faces: top, base, then the walls in
    /// [`WallSide::ALL`] order. Performs no I/O.
    pub fn assemble(
        grid: VertexGrid,
        top: TopSurface,
        base: BaseSurface,
        walls: [WallRibbon; 4],
    ) -> Self {
        let layout = grid.layout();
        let floor_z = base.floor_z();
        let mut mesh = Mesh::with_capacity(layout.total_vertex_count(), layout.total_face_count());

        let (base_vertices, base_faces) = base.into_parts();
        mesh.vertices.extend(grid.into_vertices());
        mesh.vertices.extend(base_vertices);

        let mut ranges: [Range<usize>; 6] = Default::default();
        let mut push = |slot: usize, faces: Vec<[u32; 3]>, mesh: &mut Mesh| {
            let start = mesh.faces.len();
            mesh.faces.extend(faces);
            ranges[slot] = start..mesh.faces.len();
        };

        push(0, top.into_faces(), &mut mesh);
        push(1, base_faces, &mut mesh);
        for wall in walls {
            let slot = 2 + wall_slot(wall.side());
            push(slot, wall.into_faces(), &mut mesh);
        }

        debug_assert_eq!(mesh.vertex_count(), layout.total_vertex_count());
        debug_assert_eq!(mesh.face_count(), layout.total_face_count());
        debug!(
            "Assembled solid: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.face_count()
        );

        Self {
            mesh,
            layout,
            floor_z,
            ranges,
        }
    }

    /// The assembled triangle mesh.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[cfg(test)]
    pub(crate) fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// Take the assembled mesh, dropping the surface bookkeeping.
    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    #[inline]
    pub fn layout(&self) -> TerrainLayout {
        self.layout
    }

    /// Elevation of the base.
    #[inline]
    pub fn floor_z(&self) -> f64 {
        self.floor_z
    }

    /// Face index range owned by `surface`.
    pub fn face_range(&self, surface: Surface) -> Range<usize> {
        let slot = match surface {
            Surface::Top => 0,
            Surface::Base => 1,
            Surface::Wall(side) => 2 + wall_slot(side),
        };
        self.ranges[slot].clone()
    }

    /// Faces owned by `surface`.
    pub fn faces_of(&self, surface: Surface) -> &[[u32; 3]] {
        &self.mesh.faces[self.face_range(surface)]
    }
}

fn wall_slot(side: WallSide) -> usize {
    match side {
        WallSide::North => 0,
        WallSide::South => 1,
        WallSide::West => 2,
        WallSide::East => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::Heightfield;
    use crate::params::TerrainParams;

    fn assemble(rows: usize, cols: usize) -> TerrainMesh {
        let hf = Heightfield::from_fn(rows, cols, |r, c| (r + c) as f64);
        let layout = TerrainLayout::new(rows, cols).unwrap();
        let grid = VertexGrid::build(&hf, layout, &TerrainParams::default());
        let top = TopSurface::triangulate(&layout);
        let base = BaseSurface::build(&grid, &top, 1.0);
        let walls = WallRibbon::build_all(&layout, &base);
        TerrainMesh::assemble(grid, top, base, walls)
    }

    #[test]
    fn test_ranges_cover_all_faces_in_order() {
        let solid = assemble(3, 4);
        let mut next = 0;
        for surface in Surface::ALL {
            let range = solid.face_range(surface);
            assert_eq!(range.start, next, "{} starts out of order", surface);
            assert_eq!(range.len(), solid.layout().face_count(surface));
            next = range.end;
        }
        assert_eq!(next, solid.mesh().face_count());
    }

    #[test]
    fn test_terrain_then_base_vertices() {
        let solid = assemble(2, 3);
        let mesh = solid.mesh();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.vertices[5].position.z, 3.0);
        assert_eq!(mesh.vertices[11].position.z, solid.floor_z());
        assert_eq!(solid.floor_z(), -1.0);
    }

    #[test]
    fn test_faces_of_wall() {
        let solid = assemble(2, 2);
        assert_eq!(
            solid.faces_of(Surface::Wall(WallSide::East)),
            &[[1, 3, 7], [1, 7, 5]]
        );
    }
}
