//! Benchmarks for install and remove cascades
//!
//! Measures cascade cost on long dependency chains and wide fan-outs.

use compdeps::graph::DependencyGraph;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build a chain `c0 -> c1 -> ... -> c{len}`
fn chain(len: usize) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for i in 0..len {
        let dep = format!("c{}", i + 1);
        graph
            .declare_dependency(&format!("c{}", i), &[dep.as_str()])
            .unwrap();
    }
    graph
}

/// Build a root depending on `width` leaves
fn fan_out(width: usize) -> DependencyGraph {
    let leaves: Vec<String> = (0..width).map(|i| format!("leaf{}", i)).collect();
    let mut graph = DependencyGraph::new();
    graph.declare_dependency("root", leaves.as_slice()).unwrap();
    graph
}

fn bench_install(c: &mut Criterion) {
    let mut group = c.benchmark_group("install_cascade");

    for size in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, &size| {
            let graph = chain(size);
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(graph.install("c0"))
            })
        });

        group.bench_with_input(BenchmarkId::new("fan_out", size), &size, |b, &size| {
            let graph = fan_out(size);
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(graph.install("root"))
            })
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_cascade");

    for size in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, &size| {
            let mut graph = chain(size);
            graph.install("c0");
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(graph.remove("c0"))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_install, bench_remove);
criterion_main!(benches);
