
/// A module containing the nice tree decomposition builder. It rewrites an
/// arbitrary tree decomposition into an equivalent one rooted at an empty
/// bag whose every node is a Leaf, Introduce, Forget or Join node.
pub mod nice_tree_decomposer {
    use itertools::sorted;
    use crate::graph_structures::bags::{Bag, Vertex};
    use crate::tree_decompositions::decomposition::{
        DecompositionError, NiceTreeDecomposition, TreeDecomposition,
    };
    use crate::tree_decompositions::tree_structure::{RootedTree, TreeNode};

    /// Builds a nice tree decomposition from the given tree decomposition.
    /// The input is validated for tree shape first and rejected with an
    /// error if it has the wrong edge count or is disconnected.
    ///
    /// The input is rooted at its first node; between every pair of
    /// neighbouring input bags a unary chain changes one vertex per node,
    /// nodes with several children turn into a cascade of Join nodes, and
    /// every branch ends in a Leaf with an empty bag. All vertex orders
    /// inside the chains follow ascending vertex indices, so the result is
    /// deterministic for a given input.
    pub fn nice_tree_decomposition<B: Bag>(
        input: &TreeDecomposition<B>,
    ) -> Result<NiceTreeDecomposition<B>, DecompositionError> {
        input.validate_tree()?;

        let input_root = input
            .tree
            .node_indices()
            .next()
            .ok_or(DecompositionError::NotATree)?;
        let rooted = RootedTree::from_tree(&input.tree, input_root);
        let mut output = TreeDecomposition::new();

        // chain of Forget nodes from the empty produced root down to the
        // bag of the input root
        let root = output.add_bag(B::default());
        let attach = emit_chain(&mut output, root, &[], &sorted_bag(input, input_root));
        build(input, &rooted, input_root, attach, &mut output);

        Ok(NiceTreeDecomposition { decomposition: output, root })
    }

    /// The bag of an input node as an ascending vertex list.
    fn sorted_bag<B: Bag>(input: &TreeDecomposition<B>, p: TreeNode) -> Vec<Vertex> {
        match input.bag(p) {
            Some(bag) => bag.sorted_vertices(),
            None => Vec::new(),
        }
    }

    /// Emits the unary chain that transitions between two bags, changing one
    /// vertex per node: vertices left behind on the way down are dropped
    /// first (every such node is an Introduce node), then the vertices of
    /// the target bag are picked up (Forget nodes). Returns the node that
    /// carries the target bag; when the bags are equal that is the starting
    /// node itself.
    fn emit_chain<B: Bag>(
        output: &mut TreeDecomposition<B>,
        from: TreeNode,
        from_bag: &[Vertex],
        to_bag: &[Vertex],
    ) -> TreeNode {
        let mut current = from;
        let mut bag: Vec<Vertex> = from_bag.to_vec();

        for v in sorted(from_bag.iter().copied().filter(|v| !to_bag.contains(v))) {
            bag.retain(|&u| u != v);
            let node = output.add_bag(B::from_vertices(bag.iter().copied()));
            output.connect(current, node);
            current = node;
        }
        for v in sorted(to_bag.iter().copied().filter(|v| !from_bag.contains(v))) {
            bag.push(v);
            let node = output.add_bag(B::from_vertices(bag.iter().copied()));
            output.connect(current, node);
            current = node;
        }

        current
    }

    /// Emits the nice form of the subtree rooted at input node t below the
    /// output node that already carries the bag of t.
    fn build<B: Bag>(
        input: &TreeDecomposition<B>,
        rooted: &RootedTree,
        t: TreeNode,
        attach: TreeNode,
        output: &mut TreeDecomposition<B>,
    ) {
        let bag_t = sorted_bag(input, t);
        let children: Vec<TreeNode> = match rooted.children(t) {
            Some(children) => children.clone(),
            None => Vec::new(),
        };

        if children.is_empty() {
            // chain of Introduce nodes down to the terminal Leaf
            emit_chain(output, attach, &bag_t, &[]);
            return;
        }

        if children.len() == 1 {
            let c = children[0];
            let child_attach = emit_chain(output, attach, &bag_t, &sorted_bag(input, c));
            build(input, rooted, c, child_attach, output);
            return;
        }

        // several children: a right-leaning cascade of Join nodes, each Join
        // child repeating the bag of t
        let mut current = attach;
        for (position, &c) in children.iter().enumerate() {
            if position + 1 == children.len() {
                let child_attach = emit_chain(output, current, &bag_t, &sorted_bag(input, c));
                build(input, rooted, c, child_attach, output);
            } else {
                let left = output.add_bag(B::from_vertices(bag_t.iter().copied()));
                output.connect(current, left);
                let child_attach = emit_chain(output, left, &bag_t, &sorted_bag(input, c));
                build(input, rooted, c, child_attach, output);

                let right = output.add_bag(B::from_vertices(bag_t.iter().copied()));
                output.connect(current, right);
                current = right;
            }
        }
    }
}
