use std::collections::HashSet;
use criterion::{criterion_group, criterion_main, Criterion};
use treewidth::{nice_tree_decomposition, tree_decomposition, Graph, Vertex};

/// A graph connecting every vertex to its `band` successors; its treewidth
/// equals the band, so the decomposer has to work along the whole graph.
fn banded_graph(n: usize, band: usize) -> Graph {
    let mut graph = Graph::new_undirected();
    for _ in 0..n {
        graph.add_node(());
    }
    for i in 0..n {
        for j in (i + 1)..n.min(i + band + 1) {
            graph.add_edge(Vertex::new(i), Vertex::new(j), ());
        }
    }
    graph
}

fn decomposition_benchmark(c: &mut Criterion) {
    let graph = banded_graph(40, 3);

    c.bench_function("tree decomposition of a banded graph", |b| {
        b.iter(|| tree_decomposition::<HashSet<Vertex>>(&graph, 3))
    });

    let decomposition = tree_decomposition::<HashSet<Vertex>>(&graph, 3).unwrap();
    c.bench_function("nice tree decomposition of a banded graph", |b| {
        b.iter(|| nice_tree_decomposition(&decomposition))
    });
}

criterion_group!(benches, decomposition_benchmark);
criterion_main!(benches);
