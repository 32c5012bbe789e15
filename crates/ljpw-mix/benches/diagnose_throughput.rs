use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ljpw_core::Coordinate;
use ljpw_mix::ModelConfig;

fn sample_grid() -> Vec<Coordinate> {
    let steps = [0.05, 0.3, 0.55, 0.8, 1.0];
    let mut coords = Vec::new();
    for &l in &steps {
        for &j in &steps {
            for &p in &steps {
                for &w in &steps {
                    coords.push(Coordinate::new(l, j, p, w).unwrap());
                }
            }
        }
    }
    coords
}

fn bench_diagnose(c: &mut Criterion) {
    let engine = ModelConfig::default().build_engine().unwrap();
    let grid = sample_grid();

    c.bench_function("diagnose_grid", |b| {
        b.iter(|| {
            for coord in &grid {
                black_box(engine.diagnose(coord));
            }
        })
    });
}

criterion_group!(benches, bench_diagnose);
criterion_main!(benches);
