//! Benchmarks for OBJ output.
//!
//! Run with: cargo bench -p mesh-io

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{save_obj, write_obj};
use mesh_types::{Point3, SurfaceMesh, Vector3};
use tempfile::tempdir;

/// A `n` by `n` grid of quads on a wavy sheet.
fn sheet(n: u32) -> SurfaceMesh {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (f64::from(i) * 0.37, f64::from(j) * 0.41);
            vertices.push(Point3::new(x, y, (x * 0.7).sin() * (y * 1.3).cos()));
            normals.push(Vector3::new(x.cos(), y.sin(), 1.0).normalize());
        }
    }
    let row = n + 1;
    let mut faces = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            faces.push([a, a + 1, a + row + 1]);
            faces.push([a, a + row + 1, a + row]);
        }
    }
    SurfaceMesh::from_zero_based(vertices, normals, faces).expect("valid sheet")
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("obj");
    let mesh = sheet(200);
    group.throughput(Throughput::Elements(mesh.face_count() as u64));

    group.bench_function("write_to_memory", |b| {
        let mut out = Vec::with_capacity(8 << 20);
        b.iter(|| {
            out.clear();
            write_obj(black_box(&mesh), &mut out).expect("write");
        });
    });

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sheet.obj");
    group.bench_function("save_to_file", |b| {
        b.iter(|| save_obj(black_box(&mesh), &path).expect("save"));
    });

    group.finish();
}

criterion_group!(benches, bench_write);
criterion_main!(benches);
