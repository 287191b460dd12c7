use criterion::{black_box, criterion_group, criterion_main, Criterion};

use eclipse_map::ephemeris::AnalyticEphemeris;
use eclipse_map::feasibility::eclipse_impossible;
use eclipse_map::options::RunOptions;
use eclipse_map::raster::rasterize;
use eclipse_map::time::parse_instant;

fn bench_rasterize(c: &mut Criterion) {
    let ephemeris = AnalyticEphemeris::default();
    let instant = parse_instant("2017-08-21-18-26-00").unwrap();
    let options = RunOptions::default();

    let mut group = c.benchmark_group("rasterize");
    group.sample_size(10);
    group.bench_function("one_instant_1_cell_per_degree", |b| {
        b.iter(|| rasterize(&ephemeris, black_box(&instant), &options).unwrap())
    });
    group.finish();
}

fn bench_feasibility(c: &mut Criterion) {
    let ephemeris = AnalyticEphemeris::default();
    let instant = parse_instant("2017-08-21-18-26-00").unwrap();

    c.bench_function("eclipse_impossible/geocentric", |b| {
        b.iter(|| eclipse_impossible(&ephemeris, black_box(&instant)).unwrap())
    });
}

criterion_group!(benches, bench_rasterize, bench_feasibility);
criterion_main!(benches);
