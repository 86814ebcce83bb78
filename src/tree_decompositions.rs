
/// A module containing a rooted view of decomposition trees. Decompositions
/// are stored as plain undirected graphs; the algorithms that walk them from
/// a root first orient them through this structure.
pub mod tree_structure {
    use std::collections::{HashMap, HashSet, VecDeque};
    use petgraph::graph::UnGraph;

    /// Nodes of the underlying decomposition tree.
    pub type TreeNode = petgraph::graph::NodeIndex;

    /// ## Rooted tree view
    /// Parent and children lists of an undirected tree oriented away from a
    /// chosen root.
    #[derive(PartialEq, Eq, Debug, Clone)]
    pub struct RootedTree {
        root: TreeNode,
        children_list: HashMap<TreeNode, Vec<TreeNode>>,
        parents_list: HashMap<TreeNode, TreeNode>,
    }

    impl RootedTree {
        /// Orients the given tree away from the chosen root by a breadth
        /// first traversal. Children are ordered by ascending node index so
        /// that every traversal of the view is deterministic.
        pub fn from_tree(tree: &UnGraph<(), ()>, root: TreeNode) -> RootedTree {
            let mut children_list: HashMap<TreeNode, Vec<TreeNode>> = HashMap::new();
            let mut parents_list = HashMap::new();
            let mut visited = HashSet::from([root]);
            let mut queue = VecDeque::from([root]);

            while let Some(p) = queue.pop_front() {
                let mut next: Vec<TreeNode> = tree
                    .neighbors(p)
                    .filter(|q| !visited.contains(q))
                    .collect();
                next.sort();

                for q in next {
                    visited.insert(q);
                    parents_list.insert(q, p);
                    children_list.entry(p).or_insert_with(Vec::new).push(q);
                    queue.push_back(q);
                }
            }

            RootedTree { root, children_list, parents_list }
        }

        /// Returns the root the view was built from.
        pub fn root(&self) -> TreeNode {
            self.root
        }

        /// Returns the parent of a given node p, or None for the root.
        pub fn parent(&self, p: TreeNode) -> Option<&TreeNode> {
            self.parents_list.get(&p)
        }

        /// Returns the children of a given node p if it has any.
        pub fn children(&self, p: TreeNode) -> Option<&Vec<TreeNode>> {
            self.children_list.get(&p)
        }

        /// Counts and returns the number of children of a given node p.
        pub fn children_count(&self, p: TreeNode) -> usize {
            if let Some(children) = self.children(p) { children.len() } else { 0 }
        }

        /// Checks if node p is the parent of node q.
        pub fn is_parent_of(&self, p: TreeNode, q: TreeNode) -> bool {
            if let Some(&parent) = self.parent(q) { parent == p } else { false }
        }
    }
}

/// A module containing the decomposition containers handed across the public
/// API together with the failures they can surface.
pub mod decomposition {
    use std::collections::HashMap;
    use petgraph::algo::connected_components;
    use petgraph::graph::UnGraph;
    use thiserror::Error;
    use crate::graph_structures::bags::Bag;
    use crate::tree_decompositions::tree_structure::TreeNode;

    /// Failures raised when a decomposition handed in by the caller cannot
    /// be processed.
    #[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
    pub enum DecompositionError {
        /// The decomposition graph is not a tree: its edge count does not
        /// match its node count minus one, or it is not connected.
        #[error("invalid decomposition: the decomposition graph is not a tree")]
        NotATree,
        /// A node's bag does not relate to the bags of its children as any
        /// of the four nice node types.
        #[error("invalid decomposition: node bags match no nice node type")]
        MalformedNiceNode,
    }

    /// A tree decomposition: the undirected tree plus the bag attached to
    /// each of its nodes.
    #[derive(Debug, Clone)]
    pub struct TreeDecomposition<B> {
        pub tree: UnGraph<(), ()>,
        pub bags: HashMap<TreeNode, B>,
    }

    impl<B: Bag> TreeDecomposition<B> {
        /// Creates an empty decomposition.
        pub fn new() -> TreeDecomposition<B> {
            TreeDecomposition { tree: UnGraph::new_undirected(), bags: HashMap::new() }
        }

        /// Adds a fresh node carrying the given bag and returns it.
        pub fn add_bag(&mut self, bag: B) -> TreeNode {
            let node = self.tree.add_node(());
            self.bags.insert(node, bag);
            node
        }

        /// Connects two nodes of the decomposition tree.
        pub fn connect(&mut self, p: TreeNode, q: TreeNode) {
            self.tree.add_edge(p, q, ());
        }

        /// Returns the bag of the given node p.
        pub fn bag(&self, p: TreeNode) -> Option<&B> {
            self.bags.get(&p)
        }

        /// Returns the number of nodes of the decomposition tree.
        pub fn node_count(&self) -> usize {
            self.tree.node_count()
        }

        /// The width of the decomposition: the largest bag size minus one.
        /// Empty bags do not take part in the maximum, an entirely empty
        /// decomposition has width -1.
        pub fn width(&self) -> i64 {
            self.bags
                .values()
                .filter(|bag| !bag.is_empty())
                .map(|bag| bag.len() as i64 - 1)
                .max()
                .unwrap_or(-1)
        }

        /// Checks that the decomposition graph is a tree: one node more than
        /// edges and a single connected component.
        pub fn validate_tree(&self) -> Result<(), DecompositionError> {
            if self.tree.node_count() == 0
                || self.tree.edge_count() != self.tree.node_count() - 1
            {
                return Err(DecompositionError::NotATree);
            }
            if connected_components(&self.tree) != 1 {
                return Err(DecompositionError::NotATree);
            }
            Ok(())
        }
    }

    /// A nice tree decomposition: a tree decomposition rooted at a
    /// distinguished node whose every node is a Leaf, Introduce, Forget or
    /// Join node.
    #[derive(Debug, Clone)]
    pub struct NiceTreeDecomposition<B> {
        pub decomposition: TreeDecomposition<B>,
        pub root: TreeNode,
    }
}
