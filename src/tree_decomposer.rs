
/// A module containing the tree decomposer: a recursive balanced separator
/// algorithm. For a graph G and a parameter k it either produces a tree
/// decomposition whose bags stay within the width budget of 3k+4 vertices,
/// or certifies that the treewidth of G exceeds k.
pub mod tree_decomposer {
    use std::collections::{HashMap, HashSet, VecDeque};
    use std::hash::Hash;
    use itertools::sorted;
    use log::{debug, trace};
    use petgraph::algo::ford_fulkerson;
    use petgraph::graph::DiGraph;
    use petgraph::visit::{EdgeRef, NodeIndexable};
    use petgraph::Direction;
    use crate::graph_structures::bags::{Bag, Graph, Vertex};
    use crate::tree_decompositions::decomposition::TreeDecomposition;
    use crate::tree_decompositions::tree_structure::TreeNode;

    /// Computes a tree decomposition of the given graph whose bags hold at
    /// most 3k+4 vertices each, i.e. whose width is at most 3k+3. Returns
    /// None if no such decomposition is found, certifying that the treewidth
    /// of the graph exceeds k.
    pub fn tree_decomposition<B: Bag>(graph: &Graph, k: u32) -> Option<TreeDecomposition<B>> {
        let mut result = TreeDecomposition::new();
        let all_vertices: HashSet<Vertex> =
            (0..graph.node_count()).map(|i| graph.from_index(i)).collect();

        decompose(graph, &all_vertices, &HashSet::new(), k, &mut result)?;
        Some(result)
    }

    /// Decomposes the subgraph induced by the given vertex set and returns
    /// the root of the constructed subtree. The interface holds the vertices
    /// the parent call requires in the first bag of this subtree.
    fn decompose<B: Bag>(
        graph: &Graph,
        subgraph: &HashSet<Vertex>,
        interface: &HashSet<Vertex>,
        k: u32,
        result: &mut TreeDecomposition<B>,
    ) -> Option<TreeNode> {
        trace!(
            "decomposing {} vertices with an interface of {}",
            subgraph.len(),
            interface.len()
        );

        if subgraph.is_empty() {
            return Some(result.add_bag(B::default()));
        }

        let comps = components(graph, subgraph);
        if comps.len() > 1 {
            // decompose every component on its own and hang the subtrees
            // below a fresh node with an empty bag
            let root = result.add_bag(B::default());
            for comp in comps {
                let comp_interface: HashSet<Vertex> =
                    interface.intersection(&comp).copied().collect();
                let child = decompose(graph, &comp, &comp_interface, k, result)?;
                result.connect(root, child);
            }
            return Some(root);
        }

        let budget = (3 * k + 4) as usize;
        if subgraph.len() <= budget {
            // the whole remainder fits into a single bag
            return Some(result.add_bag(B::from_vertices(sorted(subgraph.iter().copied()))));
        }

        let mut bag: HashSet<Vertex> = interface.clone();
        if interface.len() >= 2 {
            let separator = balanced_separator(graph, subgraph, interface, k)?;
            bag.extend(separator);
        }

        // one vertex beyond interface and separator keeps the recursion
        // shrinking towards the single-bag base case
        let fresh = sorted(subgraph.iter().copied()).find(|v| !bag.contains(v))?;
        bag.insert(fresh);

        if bag.len() > budget {
            debug!("bag of {} vertices exceeds the budget of {}", bag.len(), budget);
            return None;
        }

        let node = result.add_bag(B::from_vertices(sorted(bag.iter().copied())));

        let rest: HashSet<Vertex> = subgraph.difference(&bag).copied().collect();
        for comp in components(graph, &rest) {
            // the component plus the bag vertices adjacent to it form the
            // next subproblem; the boundary becomes its interface
            let boundary: HashSet<Vertex> = bag
                .iter()
                .copied()
                .filter(|&b| comp.iter().any(|&c| graph.has_edge(b, c)))
                .collect();
            let mut sub = comp.clone();
            sub.extend(boundary.iter().copied());

            let child = decompose(graph, &sub, &boundary, k, result)?;
            result.connect(node, child);
        }

        Some(node)
    }

    /// Connected components of the subgraph induced by the given vertex set,
    /// ordered by their smallest vertex.
    pub(crate) fn components(graph: &Graph, vertices: &HashSet<Vertex>) -> Vec<HashSet<Vertex>> {
        let mut remaining = vertices.clone();
        let mut comps = Vec::new();

        for start in sorted(vertices.iter().copied()) {
            if !remaining.contains(&start) {
                continue;
            }
            remaining.remove(&start);
            let mut comp = HashSet::from([start]);
            let mut queue = VecDeque::from([start]);

            while let Some(v) = queue.pop_front() {
                let next: Vec<Vertex> = remaining
                    .iter()
                    .copied()
                    .filter(|&u| graph.has_edge(v, u))
                    .collect();
                for u in next {
                    remaining.remove(&u);
                    comp.insert(u);
                    queue.push_back(u);
                }
            }
            comps.push(comp);
        }

        comps
    }

    /// Splits a sorted element list into an ordered pair of disjoint parts
    /// according to the given split index: element positions with a set bit
    /// go into the first part. Every index in 1..2^(n-1) yields a distinct
    /// bipartition, counting a pair and its mirror as the same split, since
    /// the last element always stays in the second part.
    pub fn split_set<T: Copy + Eq + Hash>(
        elements: &[T],
        split_index: u128,
    ) -> (HashSet<T>, HashSet<T>) {
        let mut first = HashSet::new();
        let mut second = HashSet::new();

        for (position, &element) in elements.iter().enumerate() {
            if position < 128 && (split_index >> position) & 1 == 1 {
                first.insert(element);
            } else {
                second.insert(element);
            }
        }

        (first, second)
    }

    /// Searches a separator of at most k+1 vertices that splits the
    /// interface in a balanced way: no component of the remainder may keep
    /// more than ceil(2|W|/3) interface vertices. The prefix bipartitions of
    /// the sorted interface are tried first, then every one of the
    /// 2^(|W|-1)-1 bipartitions in ascending split-index order; the first
    /// balanced hit wins. Returns None once every bipartition is exhausted,
    /// certifying the width bound cannot be met along this call.
    fn balanced_separator(
        graph: &Graph,
        subgraph: &HashSet<Vertex>,
        interface: &HashSet<Vertex>,
        k: u32,
    ) -> Option<HashSet<Vertex>> {
        let sorted_interface: Vec<Vertex> = sorted(interface.iter().copied()).collect();
        let size = sorted_interface.len();
        let balance_bound = (2 * size + 2) / 3;

        // growing prefixes reach balanced cuts quickly on dense interfaces;
        // they are a subset of the full enumeration behind them, which tries
        // every bipartition of the interface
        let prefixes = (1..size.min(128) as u32).map(|p| (1u128 << p) - 1);
        let split_count = 1u128.checked_shl(size as u32 - 1).unwrap_or(u128::MAX);

        for split_index in prefixes.chain(1..split_count) {
            let (side_a, side_b) = split_set(&sorted_interface, split_index);
            if let Some(separator) =
                minimum_vertex_separator(graph, subgraph, &side_a, &side_b, k + 1)
            {
                let rest: HashSet<Vertex> = subgraph.difference(&separator).copied().collect();
                let balanced = components(graph, &rest)
                    .iter()
                    .all(|comp| comp.intersection(interface).count() <= balance_bound);
                if balanced {
                    debug!(
                        "balanced separator of {} vertices at split index {}",
                        separator.len(),
                        split_index
                    );
                    return Some(separator);
                }
            }
        }

        debug!("no balanced separator of at most {} vertices", k + 1);
        None
    }

    /// Minimum vertex separator between two disjoint vertex sets inside the
    /// given subgraph, or None if it would need more than `cap` vertices.
    ///
    /// Works on the node-split flow network: every vertex turns into a unit
    /// capacity arc between an in- and an out-copy, the two sides collapse
    /// into a super source and a super sink, and every subgraph edge becomes
    /// a pair of arcs of effectively unlimited capacity. The separator is
    /// read off the saturated vertex arcs leaving the source side of the
    /// minimum cut.
    pub(crate) fn minimum_vertex_separator(
        graph: &Graph,
        subgraph: &HashSet<Vertex>,
        side_a: &HashSet<Vertex>,
        side_b: &HashSet<Vertex>,
        cap: u32,
    ) -> Option<HashSet<Vertex>> {
        let unlimited = subgraph.len() as u32 + 1;
        let mut network: DiGraph<(), u32> = DiGraph::new();
        let mut copies = HashMap::new();

        for v in sorted(subgraph.iter().copied()) {
            let v_in = network.add_node(());
            let v_out = network.add_node(());
            network.add_edge(v_in, v_out, 1);
            copies.insert(v, (v_in, v_out));
        }

        let source = network.add_node(());
        let sink = network.add_node(());
        for (&v, &(v_in, v_out)) in &copies {
            if side_a.contains(&v) {
                network.add_edge(source, v_in, unlimited);
            }
            if side_b.contains(&v) {
                network.add_edge(v_out, sink, unlimited);
            }
        }

        for &u in subgraph {
            for &v in subgraph {
                if u != v && graph.has_edge(u, v) {
                    network.add_edge(copies[&u].1, copies[&v].0, unlimited);
                }
            }
        }

        let (flow_value, flows) = ford_fulkerson(&network, source, sink);
        if flow_value > cap {
            return None;
        }

        // vertices whose in-copy is residual-reachable from the source while
        // their out-copy is not carry the saturated arcs of the minimum cut
        let mut reachable = HashSet::from([source]);
        let mut queue = VecDeque::from([source]);
        while let Some(n) = queue.pop_front() {
            for edge in network.edges_directed(n, Direction::Outgoing) {
                if flows[edge.id().index()] < *edge.weight()
                    && !reachable.contains(&edge.target())
                {
                    reachable.insert(edge.target());
                    queue.push_back(edge.target());
                }
            }
            for edge in network.edges_directed(n, Direction::Incoming) {
                if flows[edge.id().index()] > 0 && !reachable.contains(&edge.source()) {
                    reachable.insert(edge.source());
                    queue.push_back(edge.source());
                }
            }
        }

        let separator = copies
            .iter()
            .filter(|(_, (v_in, v_out))| {
                reachable.contains(v_in) && !reachable.contains(v_out)
            })
            .map(|(&v, _)| v)
            .collect();
        Some(separator)
    }
}
