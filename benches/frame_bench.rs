//! Benchmarks for per-frame camera and mesh work.
#![allow(unused_results)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use panoview::camera::core::Camera;
use panoview::camera::{
    look_at_target, AngleBounds, CameraOrientation, FrameUpdater,
    OrbitController,
};
use panoview::input::PointerSample;
use panoview::renderer::SphereMesh;

fn look_at_benchmark(c: &mut Criterion) {
    let orientation = CameraOrientation {
        longitude: 123.0,
        latitude: 40.0,
        fov: 75.0,
    };
    let bounds = AngleBounds::new(-85.0, 85.0);
    c.bench_function("look_at_target", |b| {
        b.iter(|| {
            black_box(look_at_target(
                black_box(&orientation),
                bounds,
                500.0,
            ))
        })
    });
}

fn drag_frame_benchmark(c: &mut Criterion) {
    let mut controller = OrbitController::default();
    let mut camera = Camera::new(16.0 / 9.0, 75.0, 1.0, 1100.0);
    let updater = FrameUpdater::new(500.0);
    controller.begin_drag(PointerSample::primary(0.0, 0.0));

    let mut x = 0.0;
    c.bench_function("drag_and_update_frame", |b| {
        b.iter(|| {
            x += 1.0;
            controller.update_drag(PointerSample::primary(x, x * 0.5));
            black_box(updater.update(&mut controller, &mut camera))
        })
    });
}

fn sphere_mesh_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_mesh");

    for (ws, hs) in [(60, 40), (120, 80), (240, 160)] {
        group.bench_function(format!("{ws}x{hs}"), |b| {
            b.iter(|| black_box(SphereMesh::new(500.0, ws, hs)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    look_at_benchmark,
    drag_frame_benchmark,
    sphere_mesh_benchmark
);
criterion_main!(benches);
