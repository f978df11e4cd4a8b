//! Benchmarks for raw and structural validation.
//!
//! Run with: cargo bench -p cubecut-validate

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cubecut_resolve::{BoxSize, GeometryResolver};
use cubecut_validate::{validate_raw, validate_structure, FaceKind, FacePolygon, RawMesh};

/// Unit box whose faces are split into `n * n` quads, two triangles each,
/// as an unindexed soup.
fn tessellated_box(n: usize) -> RawMesh {
    let mut positions = Vec::new();
    let step = 1.0 / n as f64;
    // (normal axis, side, u axis, v axis)
    let sides = [
        (0, 0.0, 2, 1),
        (0, 1.0, 1, 2),
        (1, 0.0, 0, 2),
        (1, 1.0, 2, 0),
        (2, 0.0, 1, 0),
        (2, 1.0, 0, 1),
    ];
    for (axis, side, u_axis, v_axis) in sides {
        let point = |i: usize, j: usize| {
            let mut p = [0.0; 3];
            p[axis] = side;
            p[u_axis] = i as f64 * step;
            p[v_axis] = j as f64 * step;
            p
        };
        for i in 0..n {
            for j in 0..n {
                let quad = [point(i, j), point(i + 1, j), point(i + 1, j + 1), point(i, j + 1)];
                for t in [[0, 1, 2], [0, 2, 3]] {
                    for k in t {
                        positions.extend(quad[k]);
                    }
                }
            }
        }
    }
    RawMesh::new(positions)
}

fn box_faces() -> Vec<FacePolygon> {
    ["0321", "4567", "0154", "2376", "1265", "0473"]
        .iter()
        .map(|key| {
            let ids: Vec<String> = key.chars().map(|c| format!("V:{c}")).collect();
            FacePolygon::new(*key, FaceKind::Original, ids)
        })
        .collect()
}

fn bench_validate_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_raw");

    for n in [1, 8, 32] {
        let mesh = tessellated_box(n);
        group.bench_with_input(BenchmarkId::new("tessellated_box", n), &mesh, |b, mesh| {
            b.iter(|| validate_raw(black_box(mesh)));
        });
    }

    group.finish();
}

fn bench_validate_structure(c: &mut Criterion) {
    let faces = box_faces();
    let resolver = GeometryResolver::standard(BoxSize::new(10.0, 20.0, 30.0).unwrap_or_default());

    c.bench_function("validate_structure/box", |b| {
        b.iter(|| validate_structure(black_box(&faces), None));
    });
    c.bench_function("validate_structure/box_with_resolver", |b| {
        b.iter(|| validate_structure(black_box(&faces), Some(&resolver)));
    });
}

criterion_group!(benches, bench_validate_raw, bench_validate_structure);
criterion_main!(benches);
