//! Benchmarks for FlowLang parsing and serialization.
//!
//! Run with: cargo bench
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Fixture documents shipped with the integration tests.
fn fixtures() -> Vec<(&'static str, &'static str)> {
    vec![
        ("order_pipeline", include_str!("../tests/fixtures/order_pipeline.flow")),
        ("support_triage", include_str!("../tests/fixtures/support_triage.flow")),
    ]
}

/// A synthetic diagram with `nodes` nodes chained by alternating arrows.
fn synthetic(nodes: usize) -> String {
    let kinds = ["event", "activity", "note", "decision"];
    let mut source = String::from("Diagram [color: blue, layout: horizontal, title: \"Bench\"] {\n");
    for i in 0..nodes {
        source.push_str(&format!(
            "    step{i} [type: {}, icon: settings, label: \"Step {i}\"]\n",
            kinds[i % kinds.len()]
        ));
    }
    for i in 1..nodes {
        let line = match i % 3 {
            0 => format!("  step{} **>** step{i}\n", i - 1),
            1 => format!("  step{} --> step{i} : next\n", i - 1),
            _ => format!("  step{} > step{i}\n", i - 1),
        };
        source.push_str(&line);
    }
    source.push('}');
    source
}

/// Benchmark the fixture documents.
fn bench_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixtures");
    for (name, content) in fixtures() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", name), content, |b, content| {
            b.iter(|| black_box(flowlang_parser::parse(content)));
        });
        group.bench_with_input(BenchmarkId::new("round_trip", name), content, |b, content| {
            b.iter(|| {
                let diagram = flowlang_parser::parse(content)?;
                black_box(flowlang_parser::serialize(&diagram.nodes, &diagram.edges, name))
            });
        });
    }
    group.finish();
}

/// Benchmark by diagram size.
fn bench_by_size(c: &mut Criterion) {
    let mut parse_group = c.benchmark_group("parse_by_size");
    for size in [10, 100, 1000] {
        let source = synthetic(size);
        parse_group.throughput(Throughput::Bytes(source.len() as u64));
        parse_group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(flowlang_parser::parse(source)));
        });
    }
    parse_group.finish();

    let mut serialize_group = c.benchmark_group("serialize_by_size");
    for size in [10, 100, 1000] {
        let Ok(diagram) = flowlang_parser::parse(&synthetic(size)) else {
            continue;
        };
        serialize_group.bench_with_input(BenchmarkId::from_parameter(size), &diagram, |b, d| {
            b.iter(|| black_box(flowlang_parser::serialize(&d.nodes, &d.edges, "Bench")));
        });
    }
    serialize_group.finish();
}

criterion_group!(benches, bench_fixtures, bench_by_size);
criterion_main!(benches);
