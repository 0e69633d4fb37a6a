//! Top-surface triangulation.

use rayon::prelude::*;
use tracing::debug;

use super::layout::TerrainLayout;

/// Triangles covering the terrain grid, two per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSurface {
    faces: Vec<[u32; 3]>,
}

impl TopSurface {
    /// Triangulate every grid cell.
    ///
    /// For the cell whose upper-left sample is `p00`, with `p01` to its right,
    /// `p10` below and `p11` diagonal, the cell emits `(p00, p11, p01)` then
    /// `(p00, p10, p11)`. Together with the vertex grid's Y flip both faces
    /// point +Z. Base and wall winding is defined relative to this order.
    pub fn triangulate(layout: &TerrainLayout) -> Self {
        let cols = layout.cols();
        let cells_per_row = cols - 1;

        let faces: Vec<[u32; 3]> = (0..layout.cell_count())
            .into_par_iter()
            .flat_map_iter(|cell| {
                let row = cell / cells_per_row;
                let col = cell % cells_per_row;
                let p00 = layout.index(row, col);
                let p01 = p00 + 1;
                let p10 = p00 + cols as u32;
                let p11 = p10 + 1;
                [[p00, p11, p01], [p00, p10, p11]]
            })
            .collect();

        debug_assert_eq!(faces.len(), layout.terrain_face_count());
        debug!("Top surface: {} triangles", faces.len());

        Self { faces }
    }

    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub(crate) fn into_faces(self) -> Vec<[u32; 3]> {
        self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell() {
        let top = TopSurface::triangulate(&TerrainLayout::new(2, 2).unwrap());
        assert_eq!(top.faces(), &[[0, 3, 1], [0, 2, 3]]);
    }

    #[test]
    fn test_cell_order_is_row_major() {
        let top = TopSurface::triangulate(&TerrainLayout::new(3, 3).unwrap());
        assert_eq!(top.faces().len(), 8);
        // second cell of the first row
        assert_eq!(top.faces()[2], [1, 5, 2]);
        assert_eq!(top.faces()[3], [1, 4, 5]);
        // first cell of the second row
        assert_eq!(top.faces()[4], [3, 7, 4]);
        assert_eq!(top.faces()[5], [3, 6, 7]);
    }
}
