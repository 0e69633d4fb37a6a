//! Index layout of a terrain solid.
//!
//! The solid's vertex buffer holds two parallel copies of the raster grid:
//!
//! ```text
//! [0, rows*cols)            terrain vertices, row-major
//! [rows*cols, 2*rows*cols)  base vertices, same order, flattened
//! ```
//!
//! Terrain index `i` and base index `i + rows*cols` describe the same raster
//! sample. Every generator takes a [`TerrainLayout`] instead of deriving these
//! offsets from buffer lengths.

use std::ops::Range;

use nalgebra::Vector3;
use serde::Serialize;

use crate::error::{TerrainError, TerrainResult};

/// One of the four vertical walls closing the solid.
///
/// Row 0 of the raster is north and is placed at the largest Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    /// Wall under the first raster row.
    North,
    /// Wall under the last raster row.
    South,
    /// Wall under the first raster column.
    West,
    /// Wall under the last raster column.
    East,
}

impl WallSide {
    /// All walls in assembly order.
    pub const ALL: [WallSide; 4] = [
        WallSide::North,
        WallSide::South,
        WallSide::West,
        WallSide::East,
    ];

    /// Unit vector pointing away from the solid's interior.
    pub fn outward(&self) -> Vector3<f64> {
        match self {
            WallSide::North => Vector3::y(),
            WallSide::South => -Vector3::y(),
            WallSide::West => -Vector3::x(),
            WallSide::East => Vector3::x(),
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            WallSide::North => "north",
            WallSide::South => "south",
            WallSide::West => "west",
            WallSide::East => "east",
        }
    }
}

impl std::fmt::Display for WallSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wall", self.name())
    }
}

/// A logically distinct surface of the solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Terrain surface, faces point +Z.
    Top,
    /// Flat floor, faces point -Z.
    Base,
    /// Vertical skirt along one raster edge.
    Wall(WallSide),
}

impl Surface {
    /// Every surface in assembly order.
    pub const ALL: [Surface; 6] = [
        Surface::Top,
        Surface::Base,
        Surface::Wall(WallSide::North),
        Surface::Wall(WallSide::South),
        Surface::Wall(WallSide::West),
        Surface::Wall(WallSide::East),
    ];
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Surface::Top => write!(f, "top surface"),
            Surface::Base => write!(f, "base"),
            Surface::Wall(side) => write!(f, "{}", side),
        }
    }
}

/// Shape of the raster grid and the index ranges derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainLayout {
    rows: usize,
    cols: usize,
}

impl TerrainLayout {
    /// Layout for a `rows x cols` raster.
    ///
    /// Fails with `InvalidShape` below 2x2, and with `MeshTooLarge` when the
    /// doubled vertex buffer could not be indexed with `u32`.
    pub fn new(rows: usize, cols: usize) -> TerrainResult<Self> {
        if rows <= 1 || cols <= 1 {
            return Err(TerrainError::invalid_shape(rows, cols));
        }

        let limit = u32::MAX as usize;
        let vertices = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(2))
            .unwrap_or(usize::MAX);
        if vertices > limit {
            return Err(TerrainError::MeshTooLarge { vertices, limit });
        }

        Ok(Self { rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One vertex per raster sample.
    #[inline]
    pub fn terrain_vertex_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Terrain plus base vertices.
    #[inline]
    pub fn total_vertex_count(&self) -> usize {
        2 * self.terrain_vertex_count()
    }

    /// Distance from a terrain vertex index to its base counterpart.
    #[inline]
    pub fn base_offset(&self) -> u32 {
        self.terrain_vertex_count() as u32
    }

    /// Index range of terrain vertices.
    pub fn terrain_vertices(&self) -> Range<u32> {
        0..self.base_offset()
    }

    /// Index range of base vertices.
    pub fn base_vertices(&self) -> Range<u32> {
        self.base_offset()..self.total_vertex_count() as u32
    }

    /// Terrain vertex index of raster sample `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> u32 {
        debug_assert!(row < self.rows && col < self.cols);
        (row * self.cols + col) as u32
    }

    /// Base vertex index of raster sample `(row, col)`.
    #[inline]
    pub fn base_index(&self, row: usize, col: usize) -> u32 {
        self.index(row, col) + self.base_offset()
    }

    /// Number of grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.rows - 1) * (self.cols - 1)
    }

    /// Triangles on the top surface (and, equally, on the base).
    #[inline]
    pub fn terrain_face_count(&self) -> usize {
        2 * self.cell_count()
    }

    /// Number of raster samples along the edge a wall follows.
    pub fn edge_len(&self, side: WallSide) -> usize {
        match side {
            WallSide::North | WallSide::South => self.cols,
            WallSide::West | WallSide::East => self.rows,
        }
    }

    /// Triangles in one wall ribbon.
    #[inline]
    pub fn wall_face_count(&self, side: WallSide) -> usize {
        2 * (self.edge_len(side) - 1)
    }

    /// Triangles owned by `surface`.
    pub fn face_count(&self, surface: Surface) -> usize {
        match surface {
            Surface::Top | Surface::Base => self.terrain_face_count(),
            Surface::Wall(side) => self.wall_face_count(side),
        }
    }

    /// Triangles in the whole solid.
    pub fn total_face_count(&self) -> usize {
        Surface::ALL.iter().map(|&s| self.face_count(s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_shapes() {
        for (rows, cols) in [(0, 0), (1, 5), (5, 1), (1, 1), (0, 3)] {
            let err = TerrainLayout::new(rows, cols).unwrap_err();
            assert!(matches!(err, TerrainError::InvalidShape { .. }));
        }
    }

    #[test]
    fn test_rejects_unindexable_sizes() {
        let err = TerrainLayout::new(70_000, 70_000).unwrap_err();
        assert!(matches!(err, TerrainError::MeshTooLarge { .. }));
    }

    #[test]
    fn test_ranges() {
        let layout = TerrainLayout::new(3, 4).unwrap();
        assert_eq!(layout.terrain_vertices(), 0..12);
        assert_eq!(layout.base_vertices(), 12..24);
        assert_eq!(layout.index(2, 1), 9);
        assert_eq!(layout.base_index(2, 1), 21);
    }

    #[test]
    fn test_face_counts() {
        let layout = TerrainLayout::new(3, 4).unwrap();
        assert_eq!(layout.terrain_face_count(), 12);
        assert_eq!(layout.wall_face_count(WallSide::North), 6);
        assert_eq!(layout.wall_face_count(WallSide::West), 4);
        // 2*12 + 2*6 + 2*4
        assert_eq!(layout.total_face_count(), 44);
    }

    #[test]
    fn test_outward_axes_are_distinct() {
        for (i, a) in WallSide::ALL.iter().enumerate() {
            for b in &WallSide::ALL[i + 1..] {
                assert!(a.outward().dot(&b.outward()) < 0.5);
            }
        }
    }
}
