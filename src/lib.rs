//! Tree decompositions of bounded width, their nice form, and the maximum
//! weighted independent set computed along them.
//!
//! The three entry points form a pipeline: [`tree_decomposition`] turns a
//! graph and a width parameter k into a decomposition whose bags stay within
//! the 3k+4 vertex budget or certifies that the treewidth exceeds k,
//! [`nice_tree_decomposition`] rewrites any tree decomposition into the
//! rooted four-node-type form, and [`max_weighted_independent_set`] runs a
//! dynamic program over the bags of the nice form to find an independent set
//! of maximum total weight together with one witness.

pub mod brute_force;
pub mod graph_structures;
pub mod max_weighted_independent_set;
pub mod nice_tree_decomposer;
pub mod tree_decomposer;
pub mod tree_decompositions;


pub use graph_structures::bags::{Bag, Graph, Vertex};
pub use max_weighted_independent_set::independent_set_algorithm::{
    max_weighted_independent_set, Color, IndependentSet,
};
pub use nice_tree_decomposer::nice_tree_decomposer::nice_tree_decomposition;
pub use tree_decomposer::tree_decomposer::tree_decomposition;
pub use tree_decompositions::decomposition::{
    DecompositionError, NiceTreeDecomposition, TreeDecomposition,
};
pub use tree_decompositions::tree_structure::{RootedTree, TreeNode};
