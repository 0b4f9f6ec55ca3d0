use criterion::{black_box, criterion_group, criterion_main, Criterion};

use svgpath::bench_only::PathBuilder;
use svgpath::{get_total_length, optimize_path, path_to_curve, parse_path_string, Round};

static INPUT: &str = "M10 20 C 30,40 50 60-70,80,90 100,110 120,130,140";

static ARCS: &str = "M0 50a50 50 0 1 1 100 0a50 50 0 1 1-100 0zm20 0a30 30 0 1 0 60 0a30 30 0 1 0-60 0z";

fn path_parser(c: &mut Criterion) {
    c.bench_function("parse path into builder", |b| {
        let input = black_box(INPUT);

        b.iter(|| {
            let mut builder = PathBuilder::default();
            let _ = builder.parse(input);
        });
    });

    c.bench_function("parse path string", |b| {
        let input = black_box(INPUT);

        b.iter(|| {
            let _ = parse_path_string(input);
        });
    });

    c.bench_function("arcs to curves", |b| {
        let input = black_box(ARCS);

        b.iter(|| {
            let _ = path_to_curve(input);
        });
    });

    c.bench_function("total length of arcs", |b| {
        let input = black_box(ARCS);

        b.iter(|| {
            let _ = get_total_length(input);
        });
    });

    c.bench_function("optimize", |b| {
        let input = black_box(ARCS);

        b.iter(|| {
            let _ = optimize_path(input, Round::default());
        });
    });
}

criterion_group!(benches, path_parser);
criterion_main!(benches);
