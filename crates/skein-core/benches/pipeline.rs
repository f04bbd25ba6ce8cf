//! End-to-end pipeline benchmarks: parse → classify → build → degrees.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use skein_core::{DegreeKind, ImportedGraph, TableParser, classify, degree_distribution};

const SIZES: &[usize] = &[100, 1_000, 10_000];

/// Ring of `n` nodes with a weight attribute per edge. Every pair is unique,
/// so the input is feasible both ways and nothing short-circuits.
fn ring_dsv(n: usize) -> String {
    let mut text = String::from("source,target,weight\n");
    for i in 0..n {
        let j = (i + 1) % n;
        text.push_str(&format!("n{i},n{j},{}\n", i % 7));
    }
    text
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest.pipeline");

    for &size in SIZES {
        let text = ring_dsv(size);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            let parser = TableParser::new();
            b.iter(|| black_box(parser.parse(text.as_bytes()).expect("valid ring")));
        });

        let parser = TableParser::new();
        let table = parser.parse(text.as_bytes()).expect("valid ring");

        group.bench_with_input(BenchmarkId::new("classify", size), &table, |b, table| {
            b.iter(|| black_box(classify(table, 0, 1)));
        });

        group.bench_with_input(BenchmarkId::new("build", size), &table, |b, table| {
            b.iter(|| black_box(ImportedGraph::from_table(table, 0, 1, true, "ring")));
        });

        let graph = ImportedGraph::from_table(&table, 0, 1, true, "ring");
        group.bench_with_input(BenchmarkId::new("degrees", size), &graph, |b, graph| {
            b.iter(|| black_box(degree_distribution(graph, DegreeKind::Out)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
