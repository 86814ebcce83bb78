/// A module containing an exhaustive independent set solver. It tries every
/// subset of vertices and is therefore only usable on small graphs; the test
/// suite checks the dynamic program against it.
pub mod brute_force_independent_set {
    use std::collections::{HashMap, HashSet};
    use petgraph::visit::NodeIndexable;
    use crate::graph_structures::bags::{Graph, Vertex};

    /// Enumerates all vertex subsets of the graph and returns the weight of
    /// the best independent one together with a witness set.
    pub fn max_weighted_independent_set_exhaustive(
        graph: &Graph,
        weights: &HashMap<Vertex, u64>,
    ) -> (u64, HashSet<Vertex>) {
        let n = graph.node_count();
        let mut best_weight = 0;
        let mut best_set = HashSet::new();

        for subset in 0u64..(1u64 << n) {
            let chosen: Vec<Vertex> = (0..n)
                .filter(|i| (subset >> i) & 1 == 1)
                .map(|i| graph.from_index(i))
                .collect();

            let independent = chosen
                .iter()
                .enumerate()
                .all(|(i, &u)| chosen[i + 1..].iter().all(|&v| !graph.has_edge(u, v)));
            if !independent {
                continue;
            }

            let weight = chosen
                .iter()
                .map(|v| weights.get(v).copied().unwrap_or(0))
                .sum();
            if weight > best_weight {
                best_weight = weight;
                best_set = chosen.into_iter().collect();
            }
        }

        (best_weight, best_set)
    }
}
