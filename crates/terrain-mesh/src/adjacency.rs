//! Edge adjacency for triangle soups.

use hashbrown::HashMap;

/// Edge-to-face incidence of a face list.
///
/// Edges are keyed by their sorted vertex pair. Directed use is tracked
/// separately so orientation can be checked: in a consistently wound closed
/// surface, each interior edge is walked once in each direction.
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    /// Faces incident to each undirected edge.
    pub edge_to_faces: HashMap<(u32, u32), Vec<usize>>,
    /// Number of faces walking each directed edge.
    pub directed_edges: HashMap<(u32, u32), u32>,
}

impl MeshAdjacency {
    /// Build adjacency from a face list.
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> =
            HashMap::with_capacity(faces.len() * 3 / 2);
        let mut directed_edges: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3);

        for (face_idx, &[a, b, c]) in faces.iter().enumerate() {
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                edge_to_faces
                    .entry(edge_key(v0, v1))
                    .or_default()
                    .push(face_idx);
                *directed_edges.entry((v0, v1)).or_insert(0) += 1;
            }
        }

        Self {
            edge_to_faces,
            directed_edges,
        }
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }

    /// Edges used by exactly one face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(&edge, _)| edge)
    }

    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges().count()
    }

    /// Edges used by more than two faces.
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() > 2)
            .map(|(&edge, _)| edge)
    }

    pub fn non_manifold_edge_count(&self) -> usize {
        self.non_manifold_edges().count()
    }

    /// Directed edges walked by more than one face, or whose reverse is
    /// never walked.
    pub fn misoriented_edge_count(&self) -> usize {
        self.directed_edges
            .iter()
            .filter(|&(&(a, b), &count)| count != 1 || !self.directed_edges.contains_key(&(b, a)))
            .count()
    }

    pub fn is_watertight(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count() == 0
    }

    /// Every directed edge appears once and is paired with its reverse.
    pub fn is_consistently_oriented(&self) -> bool {
        self.misoriented_edge_count() == 0
    }

    /// Number of edge-connected face groups.
    pub fn component_count(&self, face_count: usize) -> usize {
        let mut parent: Vec<usize> = (0..face_count).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for faces in self.edge_to_faces.values() {
            let Some((&first, rest)) = faces.split_first() else {
                continue;
            };
            for &other in rest {
                let (ra, rb) = (find(&mut parent, first), find(&mut parent, other));
                if ra != rb {
                    parent[ra] = rb;
                }
            }
        }

        (0..face_count).filter(|&i| find(&mut parent, i) == i).count()
    }
}

#[inline]
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}
