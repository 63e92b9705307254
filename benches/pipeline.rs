//! Benchmarks for row tokenization and the full table pipeline.
//!
//! Run with: cargo bench --bench pipeline

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use planetary_wkt::config::PipelineConfig;
use planetary_wkt::document::render_document;
use planetary_wkt::ingestion::{PipelineObserver, tokenize};
use planetary_wkt::pipeline::load_catalog;
use planetary_wkt::wkt::WktFormatter;

struct NullObserver;

impl PipelineObserver for NullObserver {}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    group.bench_function("plain_row", |b| {
        let line = "IAU,2015,49911,Mars 2000 / Sinusoidal,49900,Sinusoidal,Longitude_Of_Center,0,False_Easting,0";
        b.iter(|| tokenize(black_box(line)))
    });

    group.bench_function("quoted_row", |b| {
        let line = r#"IAU,2015,49901,"Mars 2000, west, planetodetic",49900,Ellipsoidal,West"#;
        b.iter(|| tokenize(black_box(line)))
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let config = PipelineConfig::for_directory(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/iau2015"));
    let formatter = WktFormatter::new(config.wkt.clone());

    c.bench_function("load_and_render_fixture", |b| {
        b.iter(|| {
            let (catalog, _) = load_catalog(black_box(&config), &NullObserver).unwrap();
            let mut out = Vec::with_capacity(16 * 1024);
            render_document(&mut out, &catalog.geodetic, &catalog.projected, &formatter).unwrap();
            out
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_pipeline);
criterion_main!(benches);
