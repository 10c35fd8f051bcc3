use criterion::{Criterion, criterion_group, criterion_main};
use meshplot::io::{dcel_to_string, read_dcel, read_polygon_mesh};
use meshplot::mesh::FaceId;
use meshplot::render::dcel_drawer::DcelDrawer;
use meshplot::render::palette::FaceColors;
use meshplot::render::raster::Rasterizer;
use meshplot::render::Renderer;
use meshplot::validate::check_mesh;
use meshplot::DCEL;
use std::fmt::Write;
use std::hint::black_box;

const GRID_SIZES: &[usize] = &[8, 32];

/// n x n grid of unit squares plus the clockwise outer face, in the polygon-list format.
fn grid_mesh_text(n: usize) -> String {
    let side = n + 1;
    let id = |x: usize, y: usize| y * side + x + 1;
    let mut text = String::new();

    writeln!(text, "{} {}", side * side, n * n + 1).unwrap();
    for y in 0..side {
        for x in 0..side {
            writeln!(text, "{x} {y}").unwrap();
        }
    }
    for y in 0..n {
        for x in 0..n {
            writeln!(
                text,
                "{} {} {} {}",
                id(x, y),
                id(x + 1, y),
                id(x + 1, y + 1),
                id(x, y + 1)
            )
            .unwrap();
        }
    }

    // outer face: the boundary walked counter-clockwise from the top-left corner, reversed
    let mut outer = Vec::new();
    outer.extend((1..=n).rev().map(|y| id(0, y)));
    outer.extend((0..n).map(|x| id(x, 0)));
    outer.extend((0..n).map(|y| id(n, y)));
    outer.extend((1..=n).rev().map(|x| id(x, n)));
    let outer: Vec<String> = outer.iter().rev().map(|v| v.to_string()).collect();
    writeln!(text, "{}", outer.join(" ")).unwrap();

    text
}

fn mesh_pipeline_benchmark(c: &mut Criterion) {
    for &n in GRID_SIZES {
        let mut group = c.benchmark_group(format!("grid {n}x{n}"));

        let polygon_text = grid_mesh_text(n);
        let mesh = read_polygon_mesh(polygon_text.as_bytes()).expect("grid mesh must parse");
        let dcel = DCEL::from_polygon_mesh(&mesh).expect("grid mesh must be closed");
        let dcel_text = dcel_to_string(&dcel).unwrap();

        group.bench_function("parse polygons", |b| {
            b.iter(|| black_box(read_polygon_mesh(polygon_text.as_bytes()).unwrap()))
        });
        group.bench_function("parse DCEL", |b| {
            b.iter(|| black_box(read_dcel(dcel_text.as_bytes()).unwrap()))
        });
        group.bench_function("validate", |b| {
            b.iter(|| black_box(check_mesh(&mesh).is_ok()))
        });
        group.bench_function("face boundaries", |b| {
            b.iter(|| {
                for f in 0..dcel.faces().len() {
                    black_box(dcel.face_boundary(FaceId(f)).unwrap());
                }
            })
        });

        let scene = DcelDrawer::scene(&dcel, &mut FaceColors::new(Some(0))).unwrap();
        group.bench_function("rasterize", |b| {
            let mut renderer = Rasterizer::new(800);
            b.iter(|| black_box(renderer.create_frame(&scene)))
        });

        group.finish();
    }
}

criterion_group!(benches, mesh_pipeline_benchmark);
criterion_main!(benches);
