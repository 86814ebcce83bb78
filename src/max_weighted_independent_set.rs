
/// A module containing the maximum weighted independent set computation on
/// a nice tree decomposition: a dynamic program over the subsets of every
/// bag with committed-vertex backpointers for reconstructing a witness.
pub mod independent_set_algorithm {
    use std::collections::HashMap;
    use std::collections::HashSet;
    use log::trace;
    use petgraph::visit::NodeIndexable;
    use crate::graph_structures::bags::{Bag, Graph, Vertex};
    use crate::tree_decompositions::decomposition::{DecompositionError, NiceTreeDecomposition};
    use crate::tree_decompositions::tree_structure::{RootedTree, TreeNode};

    /// Colour classes of the returned partition: vertices of the found
    /// independent set are `In`, all other vertices are `Out`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Color {
        In,
        Out,
    }

    /// Result of the computation: the total weight of a maximum weighted
    /// independent set and the colouring that singles its members out.
    #[derive(Debug, Clone)]
    pub struct IndependentSet {
        pub total_weight: u64,
        pub colors: HashMap<Vertex, Color>,
    }

    /// Node type of a nice decomposition node, inferred from its child
    /// count and the bag size relations towards the children.
    enum NiceNode {
        Leaf,
        Introduce(TreeNode, Vertex),
        Forget(TreeNode, Vertex),
        Join(TreeNode, TreeNode),
    }

    /// Subsets of a bag are keyed by their ascending vertex list, which is
    /// canonical independently of any container order.
    type SubsetKey = Vec<Vertex>;

    /// A struct containing all data of the dynamic program: the table of
    /// weights and committed vertices per (node, subset) cell, the sorted
    /// bag of every node and the rooted view of the decomposition tree.
    struct DpData<'a> {
        table: HashMap<TreeNode, HashMap<SubsetKey, (u64, Vec<Vertex>)>>,
        sorted_bags: HashMap<TreeNode, Vec<Vertex>>,
        rooted: RootedTree,
        graph: &'a Graph,
        weights: &'a HashMap<Vertex, u64>,
    }

    impl<'a> DpData<'a> {
        /// A simple constructor creating an empty table.
        fn new<B: Bag>(
            graph: &'a Graph,
            ntd: &NiceTreeDecomposition<B>,
            weights: &'a HashMap<Vertex, u64>,
        ) -> DpData<'a> {
            let sorted_bags = ntd
                .decomposition
                .bags
                .iter()
                .map(|(&node, bag)| (node, bag.sorted_vertices()))
                .collect();
            let rooted = RootedTree::from_tree(&ntd.decomposition.tree, ntd.root);

            DpData { table: HashMap::new(), sorted_bags, rooted, graph, weights }
        }

        /// Returns the entry for node p and subset s if already computed.
        fn get(&self, p: TreeNode, s: &SubsetKey) -> Option<&(u64, Vec<Vertex>)> {
            if let Some(subsets) = self.table.get(&p) { subsets.get(s) } else { None }
        }

        /// Sets the entry for node p and subset s.
        fn set(&mut self, p: TreeNode, s: SubsetKey, weight: u64, committed: Vec<Vertex>) {
            self.table
                .entry(p)
                .or_insert_with(HashMap::new)
                .insert(s, (weight, committed));
        }

        /// The weight of a single vertex; vertices without an entry weigh nothing.
        fn weight_of(&self, v: Vertex) -> u64 {
            self.weights.get(&v).copied().unwrap_or(0)
        }

        /// The bag of node p as an ascending vertex list.
        fn sorted_bag(&self, p: TreeNode) -> &[Vertex] {
            match self.sorted_bags.get(&p) {
                Some(bag) => bag,
                None => &[],
            }
        }

        /// Infers the nice node type of p. Bag relations that fit none of
        /// the four node types are rejected.
        fn classify(&self, p: TreeNode) -> Result<NiceNode, DecompositionError> {
            let children: &[TreeNode] = match self.rooted.children(p) {
                Some(children) => children.as_slice(),
                None => &[],
            };
            let bag = self.sorted_bag(p);

            match children {
                // a terminal node only qualifies as a Leaf with an empty bag
                [] if bag.is_empty() => Ok(NiceNode::Leaf),
                [] => Err(DecompositionError::MalformedNiceNode),
                [c] => {
                    let child_bag = self.sorted_bag(*c);
                    let gained: Vec<Vertex> = bag
                        .iter()
                        .copied()
                        .filter(|v| !child_bag.contains(v))
                        .collect();
                    let lost: Vec<Vertex> = child_bag
                        .iter()
                        .copied()
                        .filter(|v| !bag.contains(v))
                        .collect();

                    match (gained.as_slice(), lost.as_slice()) {
                        ([v], []) => Ok(NiceNode::Introduce(*c, *v)),
                        ([], [v]) => Ok(NiceNode::Forget(*c, *v)),
                        _ => Err(DecompositionError::MalformedNiceNode),
                    }
                }
                [c1, c2] => {
                    let same = self.sorted_bag(*c1) == bag && self.sorted_bag(*c2) == bag;
                    if same {
                        Ok(NiceNode::Join(*c1, *c2))
                    } else {
                        Err(DecompositionError::MalformedNiceNode)
                    }
                }
                _ => Err(DecompositionError::MalformedNiceNode),
            }
        }
    }

    /// Computes the maximum weighted independent set of the graph along the
    /// given nice tree decomposition. Returns the total weight together with
    /// the colouring of every vertex, or an error if the decomposition is
    /// not a tree or a node fits none of the four nice node types.
    pub fn max_weighted_independent_set<B: Bag>(
        graph: &Graph,
        ntd: &NiceTreeDecomposition<B>,
        weights: &HashMap<Vertex, u64>,
    ) -> Result<IndependentSet, DecompositionError> {
        ntd.decomposition.validate_tree()?;
        if ntd.root.index() >= ntd.decomposition.tree.node_count() {
            return Err(DecompositionError::NotATree);
        }

        let mut dp = DpData::new(graph, ntd, weights);
        let total_weight = calculate_weight(&mut dp, ntd.root, Vec::new())?;
        let independent_set = collect_independent_set(&dp)?;
        trace!("found an independent set of weight {}", total_weight);

        let mut colors = HashMap::new();
        for i in 0..graph.node_count() {
            let v = graph.from_index(i);
            let color = if independent_set.contains(&v) { Color::In } else { Color::Out };
            colors.insert(v, color);
        }

        Ok(IndependentSet { total_weight, colors })
    }

    /// Checks whether the vertex is adjacent to any vertex of the subset.
    fn is_adjacent(graph: &Graph, subset: &[Vertex], v: Vertex) -> bool {
        subset.iter().any(|&u| graph.has_edge(u, v))
    }

    /// Fills the table cell of node t and subset s and returns its weight.
    /// The subset holds the bag vertices committed to the independent set;
    /// cells are computed lazily from the root downwards.
    fn calculate_weight(
        dp: &mut DpData,
        t: TreeNode,
        subset: SubsetKey,
    ) -> Result<u64, DecompositionError> {
        if let Some(cell) = dp.get(t, &subset) {
            return Ok(cell.0);
        }

        let (weight, committed) = match dp.classify(t)? {
            NiceNode::Leaf => (0, Vec::new()),
            NiceNode::Join(c1, c2) => {
                // both children have seen disjoint parts of the graph apart
                // from the shared bag, whose weight is counted twice
                let first = calculate_weight(dp, c1, subset.clone())?;
                let second = calculate_weight(dp, c2, subset.clone())?;
                let shared: u64 = subset.iter().map(|&v| dp.weight_of(v)).sum();
                (first + second - shared, Vec::new())
            }
            NiceNode::Introduce(c, v) => {
                if subset.contains(v) {
                    let mut child_subset = subset.clone();
                    child_subset.retain(|&u| u != v);
                    (calculate_weight(dp, c, child_subset)? + dp.weight_of(v), Vec::new())
                } else {
                    (calculate_weight(dp, c, subset.clone())?, Vec::new())
                }
            }
            NiceNode::Forget(c, v) => {
                let without = calculate_weight(dp, c, subset.clone())?;
                if is_adjacent(dp.graph, &subset, v) {
                    // v cannot join the chosen subset
                    (without, Vec::new())
                } else {
                    let mut with_subset = subset.clone();
                    with_subset.push(v);
                    with_subset.sort();
                    let with = calculate_weight(dp, c, with_subset)?;
                    if with > without { (with, vec![v]) } else { (without, Vec::new()) }
                }
            }
        };

        dp.set(t, subset, weight, committed);
        Ok(weight)
    }

    /// Collects the witness set by walking the tree from the root. At every
    /// Forget node the vertices committed for the current bag subset join
    /// the set; all other node types leave it untouched.
    fn collect_independent_set(dp: &DpData) -> Result<HashSet<Vertex>, DecompositionError> {
        let mut independent_set = HashSet::new();
        let mut stack = vec![dp.rooted.root()];

        while let Some(t) = stack.pop() {
            if let NiceNode::Forget(..) = dp.classify(t)? {
                let key: SubsetKey = dp
                    .sorted_bag(t)
                    .iter()
                    .copied()
                    .filter(|v| independent_set.contains(v))
                    .collect();
                if let Some((_, committed)) = dp.get(t, &key) {
                    independent_set.extend(committed.iter().copied());
                }
            }
            if let Some(children) = dp.rooted.children(t) {
                stack.extend(children.iter().copied());
            }
        }

        Ok(independent_set)
    }
}
