//! Raster samples to terrain vertices.

use rayon::prelude::*;
use tracing::debug;

use super::layout::TerrainLayout;
use crate::Vertex;
use crate::heightfield::Heightfield;
use crate::params::TerrainParams;

/// Terrain vertices, one per raster sample, in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGrid {
    layout: TerrainLayout,
    vertices: Vec<Vertex>,
}

impl VertexGrid {
    /// Map every sample `(row, col)` with value `v` to
    /// `(col * xscale, (1 - row) * yscale, v * zscale)`.
    ///
    /// The heightfield must have the shape `layout` was built from.
    pub fn build(heightfield: &Heightfield, layout: TerrainLayout, params: &TerrainParams) -> Self {
        debug_assert_eq!(heightfield.shape(), (layout.rows(), layout.cols()));

        let cols = layout.cols();
        let TerrainParams {
            xscale,
            yscale,
            zscale,
            ..
        } = *params;

        let vertices: Vec<Vertex> = heightfield
            .samples()
            .par_iter()
            .enumerate()
            .map(|(idx, &sample)| {
                let row = (idx / cols) as f64;
                let col = (idx % cols) as f64;
                Vertex::from_coords(col * xscale, (1.0 - row) * yscale, sample * zscale)
            })
            .collect();

        debug!(
            "Vertex grid: {} vertices ({}x{})",
            vertices.len(),
            layout.rows(),
            layout.cols()
        );

        Self { layout, vertices }
    }

    #[inline]
    pub fn layout(&self) -> TerrainLayout {
        self.layout
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Lowest terrain elevation. NaN elevations are skipped.
    pub fn min_z(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.position.z)
            .fold(f64::INFINITY, f64::min)
    }

    pub(crate) fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_coordinate_mapping() {
        let hf = Heightfield::from_rows(&[[5.0, 6.0, 7.0], [8.0, 9.0, 10.0]]).unwrap();
        let layout = TerrainLayout::new(2, 3).unwrap();
        let params = TerrainParams {
            xscale: 2.0,
            yscale: 3.0,
            zscale: 0.5,
            ..Default::default()
        };
        let grid = VertexGrid::build(&hf, layout, &params);

        assert_eq!(grid.vertices().len(), 6);
        assert_eq!(grid.vertices()[0].position, Point3::new(0.0, 3.0, 2.5));
        assert_eq!(grid.vertices()[2].position, Point3::new(4.0, 3.0, 3.5));
        // row 1 lands at y = 0
        assert_eq!(grid.vertices()[4].position, Point3::new(2.0, 0.0, 4.5));
        assert_eq!(grid.min_z(), 2.5);
    }

    #[test]
    fn test_row_zero_has_largest_y() {
        let hf = Heightfield::from_fn(4, 2, |_, _| 0.0);
        let grid = VertexGrid::build(&hf, TerrainLayout::new(4, 2).unwrap(), &TerrainParams::default());
        let ys: Vec<f64> = grid.vertices().iter().step_by(2).map(|v| v.position.y).collect();
        assert_eq!(ys, vec![1.0, 0.0, -1.0, -2.0]);
    }
}
