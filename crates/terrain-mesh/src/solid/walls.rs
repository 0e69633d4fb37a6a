//! Vertical walls joining the terrain perimeter to the base.
//!
//! Each wall is a ribbon of quads between consecutive perimeter samples `a`,
//! `a'` on the terrain and their base copies `b = a + offset`,
//! `b' = a' + offset`. Every quad is split along the `a`-`b'` diagonal and
//! wound so the face normal points along [`WallSide::outward`].
//!
//! Walls only index existing vertices; they add none. When the floor
//! coincides with a perimeter sample (zero box height over flat ground) the
//! affected triangles have zero area but the topology stays closed.

use tracing::debug;

use super::base::BaseSurface;
use super::layout::{TerrainLayout, WallSide};

/// Triangles of one wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallRibbon {
    side: WallSide,
    faces: Vec<[u32; 3]>,
}

impl WallRibbon {
    /// Stitch the `side` edge of the terrain to the base.
    pub fn build(side: WallSide, layout: &TerrainLayout, base: &BaseSurface) -> Self {
        let offset = base.offset();
        let cols = layout.cols();
        let stride = cols as u32;

        let segments = layout.edge_len(side) - 1;
        let mut faces = Vec::with_capacity(2 * segments);

        match side {
            WallSide::North => {
                for col in 0..segments {
                    let a = layout.index(0, col);
                    let b = a + offset;
                    faces.push([a, a + 1, b + 1]);
                    faces.push([a, b + 1, b]);
                }
            }
            WallSide::South => {
                let last = layout.rows() - 1;
                for col in 0..segments {
                    let a = layout.index(last, col);
                    let b = a + offset;
                    faces.push([a, b + 1, a + 1]);
                    faces.push([a, b, b + 1]);
                }
            }
            WallSide::West => {
                for row in 0..segments {
                    let a = layout.index(row, 0);
                    let b = a + offset;
                    faces.push([a, b + stride, a + stride]);
                    faces.push([a, b, b + stride]);
                }
            }
            WallSide::East => {
                for row in 0..segments {
                    let a = layout.index(row, cols - 1);
                    let b = a + offset;
                    faces.push([a, a + stride, b + stride]);
                    faces.push([a, b + stride, b]);
                }
            }
        }

        debug!("{}: {} triangles", side, faces.len());

        Self { side, faces }
    }

    /// Build all four walls in assembly order.
    pub fn build_all(layout: &TerrainLayout, base: &BaseSurface) -> [WallRibbon; 4] {
        WallSide::ALL.map(|side| Self::build(side, layout, base))
    }

    #[inline]
    pub fn side(&self) -> WallSide {
        self.side
    }

    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub(crate) fn into_faces(self) -> Vec<[u32; 3]> {
        self.faces
    }
}
