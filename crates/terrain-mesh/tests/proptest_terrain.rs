//! Property-based tests for terrain meshing.
//!
//! These tests use proptest to generate random rasters and parameters and
//! verify the structural invariants of the resulting solid.
//!
//! Run with: cargo test -p terrain-mesh -- proptest

use proptest::prelude::*;
use terrain_mesh::{
    Heightfield, MeshAdjacency, Surface, TerrainError, TerrainParams, build_terrain_mesh,
};

// =============================================================================
// Strategies
// =============================================================================

/// Random raster between 2x2 and 24x24 with bounded elevations.
fn arb_heightfield() -> impl Strategy<Value = Heightfield> {
    (2usize..=24, 2usize..=24).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-500.0..500.0f64, rows * cols).prop_map(move |samples| {
            Heightfield::from_vec(rows, cols, samples).expect("sample count matches shape")
        })
    })
}

fn arb_params() -> impl Strategy<Value = TerrainParams> {
    (0.01..100.0f64, 0.01..100.0f64, -10.0..10.0f64, 0.0..50.0f64).prop_map(
        |(xscale, yscale, zscale, box_height)| TerrainParams {
            xscale,
            yscale,
            zscale,
            box_height,
            ..Default::default()
        },
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_counts(hf in arb_heightfield(), params in arb_params()) {
        let (rows, cols) = hf.shape();
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let mesh = solid.mesh();

        prop_assert_eq!(mesh.vertex_count(), 2 * rows * cols);
        prop_assert_eq!(
            mesh.face_count(),
            4 * (rows - 1) * (cols - 1) + 4 * (cols - 1) + 4 * (rows - 1)
        );
        let total: usize = Surface::ALL.iter().map(|&s| solid.faces_of(s).len()).sum();
        prop_assert_eq!(total, mesh.face_count());
    }

    #[test]
    fn proptest_indices_in_range(hf in arb_heightfield(), params in arb_params()) {
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let n = solid.mesh().vertex_count() as u32;
        for face in &solid.mesh().faces {
            prop_assert!(face.iter().all(|&i| i < n), "face {:?} out of range", face);
        }
    }

    #[test]
    fn proptest_closed_and_oriented(hf in arb_heightfield(), params in arb_params()) {
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let adjacency = MeshAdjacency::build(&solid.mesh().faces);

        prop_assert!(adjacency.is_watertight());
        prop_assert!(adjacency.is_manifold());
        prop_assert!(adjacency.is_consistently_oriented());
    }

    #[test]
    fn proptest_base_is_flat(hf in arb_heightfield(), params in arb_params()) {
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let mesh = solid.mesh();
        let floor = solid.floor_z();

        for idx in solid.layout().base_vertices() {
            prop_assert_eq!(mesh.vertices[idx as usize].position.z, floor);
        }
        for idx in solid.layout().terrain_vertices() {
            prop_assert!(mesh.vertices[idx as usize].position.z >= floor);
        }
    }

    #[test]
    fn proptest_walls_face_outward(hf in arb_heightfield(), params in arb_params()) {
        let params = TerrainParams { box_height: params.box_height + 0.5, ..params };
        let solid = build_terrain_mesh(&hf, &params).unwrap();
        let report = solid.verify_wall_normals();
        prop_assert!(report.is_ok(), "{}", report);
    }

    #[test]
    fn proptest_idempotent(hf in arb_heightfield(), params in arb_params()) {
        let a = build_terrain_mesh(&hf, &params).unwrap();
        let b = build_terrain_mesh(&hf, &params).unwrap();
        prop_assert_eq!(a.mesh(), b.mesh());
    }

    #[test]
    fn proptest_thin_rasters_rejected(len in 0usize..64, vertical in any::<bool>()) {
        let (rows, cols) = if vertical { (len, 1) } else { (1, len) };
        let hf = Heightfield::from_fn(rows, cols, |r, c| (r + c) as f64);
        let err = build_terrain_mesh(&hf, &TerrainParams::default()).unwrap_err();
        prop_assert!(matches!(err, TerrainError::InvalidShape { .. }), "got {:?}", err);
    }
}
