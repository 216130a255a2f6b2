use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use linkrank::corpus::{generate, SyntheticConfig};
use linkrank::{GraphBuilder, GraphView, LinkPolicy, Normalizer, PageRankConfig};
use linkrank_graph_algorithms::{degree_statistics, page_rank};

fn corpus(size: usize) -> Vec<linkrank::Document> {
    generate(&SyntheticConfig {
        num_files: size,
        max_refs: 50,
        seed: 0,
        ..Default::default()
    })
}

/// Benchmark adjacency matrix construction
fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");
    let builder = GraphBuilder::new(Normalizer::new("", ".html"), LinkPolicy::Skip);

    for size in [100, 1000, 5000].iter() {
        let docs = corpus(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let graph = builder.build(&docs).unwrap();
                criterion::black_box(graph.matrix.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark PageRank to convergence
fn bench_pagerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");
    let builder = GraphBuilder::new(Normalizer::new("", ".html"), LinkPolicy::Skip);

    for size in [100, 1000, 5000].iter() {
        let graph = builder.build(&corpus(*size)).unwrap();
        let view = GraphView::from_matrix(&graph.matrix);
        let config = PageRankConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let result = page_rank(&view, &config).unwrap();
                criterion::black_box(result.iterations);
            });
        });
    }
    group.finish();
}

/// Benchmark degree statistics
fn bench_degree_statistics(c: &mut Criterion) {
    let builder = GraphBuilder::new(Normalizer::new("", ".html"), LinkPolicy::Skip);
    let graph = builder.build(&corpus(2000)).unwrap();

    c.bench_function("degree_statistics_2000", |b| {
        b.iter(|| criterion::black_box(degree_statistics(&graph.matrix).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_graph_build,
    bench_pagerank,
    bench_degree_statistics
);
criterion_main!(benches);
