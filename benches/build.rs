use criterion::{criterion_group, criterion_main, Criterion};
use portal_dodeca::export::write_portal_glb;
use portal_dodeca::geometry::{build_indexed_dodecahedron, Solid};
use portal_dodeca::types::{Color, PortalMaterial};

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_indexed_dodecahedron", |b| {
        b.iter(|| build_indexed_dodecahedron(std::hint::black_box(3.0), 0).unwrap())
    });

    let mut group = c.benchmark_group("polyhedron_generate");
    for detail in [0u32, 4, 16] {
        group.bench_function(format!("icosahedron_detail_{detail}"), |b| {
            b.iter(|| Solid::Icosahedron.mesh(1.0, std::hint::black_box(detail)))
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mesh = build_indexed_dodecahedron(3.0, 0).unwrap();
    let materials: Vec<PortalMaterial> = (0..12)
        .map(|face| PortalMaterial::new(face, Color::rgb(255, 165, 0)))
        .collect();

    c.bench_function("write_portal_glb", |b| {
        b.iter(|| write_portal_glb(&mesh, &materials, 1.5).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_export);
criterion_main!(benches);
