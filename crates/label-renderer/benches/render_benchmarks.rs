//! Benchmarks for label rasterization and PNG encoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use label_common::{MarkupParser, Rasterizer, RenderOptions};
use label_renderer::LabelRenderer;
use test_utils::fixtures;
use zpl_parser::ZplParser;

fn bench_shipping_label(c: &mut Criterion) {
    let labels = ZplParser::new()
        .parse(fixtures::SHIPPING_LABEL.as_bytes())
        .expect("fixture parses");
    let renderer = LabelRenderer::new();

    let mut group = c.benchmark_group("render_shipping_label");
    for dpmm in [6i64, 8, 12, 24] {
        let options = RenderOptions::from_geometry(100, 150, dpmm);
        group.bench_with_input(BenchmarkId::from_parameter(dpmm), &options, |b, options| {
            b.iter(|| renderer.render_png(black_box(&labels[0]), black_box(options)))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let markup = test_utils::multi_label(50);
    c.bench_function("parse_50_labels", |b| {
        b.iter(|| ZplParser::new().parse(black_box(markup.as_bytes())))
    });
}

criterion_group!(benches, bench_shipping_label, bench_parse);
criterion_main!(benches);
