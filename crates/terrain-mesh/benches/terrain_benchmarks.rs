//! Benchmarks for terrain meshing.
//!
//! Run with: cargo bench -p terrain-mesh
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p terrain-mesh -- --save-baseline main
//! 2. After changes: cargo bench -p terrain-mesh -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use terrain_mesh::{Heightfield, TerrainParams, build_terrain_mesh, validate_mesh};

/// Smooth synthetic terrain.
fn create_heightfield(size: usize) -> Heightfield {
    Heightfield::from_fn(size, size, |r, c| {
        let (x, y) = (c as f64 / size as f64, r as f64 / size as f64);
        (x * 12.0).sin() * (y * 9.0).cos() * 40.0 + x * 10.0
    })
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_terrain_mesh");
    let params = TerrainParams {
        box_height: 5.0,
        ..Default::default()
    };

    for size in [64, 256, 1024] {
        let hf = create_heightfield(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &hf, |b, hf| {
            b.iter(|| build_terrain_mesh(black_box(hf), black_box(&params)))
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_mesh");

    for size in [64, 256] {
        let solid =
            build_terrain_mesh(&create_heightfield(size), &TerrainParams::default()).unwrap();
        group.throughput(Throughput::Elements(solid.mesh().face_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            solid.mesh(),
            |b, mesh| b.iter(|| validate_mesh(black_box(mesh))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_validate);
criterion_main!(benches);
