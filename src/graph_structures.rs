
/// A module containing the vertex identity shared by all graphs of this
/// crate together with the capability contract for bag containers.
pub mod bags {
    use std::collections::{BTreeSet, HashSet};
    use petgraph::matrix_graph::MatrixGraph;
    use petgraph::Undirected;

    /// ## Type aliases for better readability
    /// Vertices of the host graph equal the node indices of the matrix graph.
    pub type Vertex = petgraph::matrix_graph::NodeIndex;
    /// Host graphs are stored as adjacency matrices so that edge lookups
    /// stay constant time; the decomposition algorithms query adjacency a lot.
    pub type Graph = MatrixGraph<(), (), Undirected>;

    /// The capability contract every bag container has to fulfil: insertion,
    /// removal, membership, size and snapshot iteration, with set semantics.
    /// The decomposition algorithms depend on nothing beyond these methods,
    /// so callers are free to choose the container shape.
    pub trait Bag: Clone + Default + std::fmt::Debug {
        /// Inserts a vertex. Inserting a vertex twice must keep the bag unchanged.
        fn insert(&mut self, v: Vertex);

        /// Removes a vertex if present.
        fn remove(&mut self, v: Vertex);

        /// Checks whether the bag contains the given vertex.
        fn contains(&self, v: Vertex) -> bool;

        /// Returns the number of distinct vertices in the bag.
        fn len(&self) -> usize;

        /// Returns a snapshot of the contained vertices in container order.
        fn vertices(&self) -> Vec<Vertex>;

        /// Checks whether the bag is empty.
        fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Returns the contained vertices in ascending index order.
        fn sorted_vertices(&self) -> Vec<Vertex> {
            let mut vertices = self.vertices();
            vertices.sort();
            vertices
        }

        /// Set equality, independent of the container order.
        fn set_eq(&self, other: &Self) -> bool {
            self.sorted_vertices() == other.sorted_vertices()
        }

        /// Builds a bag containing the given vertices.
        fn from_vertices<I: IntoIterator<Item = Vertex>>(vertices: I) -> Self {
            let mut bag = Self::default();
            for v in vertices {
                bag.insert(v);
            }
            bag
        }
    }

    impl Bag for HashSet<Vertex> {
        fn insert(&mut self, v: Vertex) {
            HashSet::insert(self, v);
        }

        fn remove(&mut self, v: Vertex) {
            HashSet::remove(self, &v);
        }

        fn contains(&self, v: Vertex) -> bool {
            HashSet::contains(self, &v)
        }

        fn len(&self) -> usize {
            HashSet::len(self)
        }

        fn vertices(&self) -> Vec<Vertex> {
            self.iter().copied().collect()
        }
    }

    impl Bag for BTreeSet<Vertex> {
        fn insert(&mut self, v: Vertex) {
            BTreeSet::insert(self, v);
        }

        fn remove(&mut self, v: Vertex) {
            BTreeSet::remove(self, &v);
        }

        fn contains(&self, v: Vertex) -> bool {
            BTreeSet::contains(self, &v)
        }

        fn len(&self) -> usize {
            BTreeSet::len(self)
        }

        fn vertices(&self) -> Vec<Vertex> {
            self.iter().copied().collect()
        }
    }

    /// Vectors qualify as bags as well. Membership is linear, which is fine
    /// for the bag sizes the decomposers produce.
    impl Bag for Vec<Vertex> {
        fn insert(&mut self, v: Vertex) {
            if !self.iter().any(|&u| u == v) {
                self.push(v);
            }
        }

        fn remove(&mut self, v: Vertex) {
            self.retain(|&u| u != v);
        }

        fn contains(&self, v: Vertex) -> bool {
            self.iter().any(|&u| u == v)
        }

        fn len(&self) -> usize {
            Vec::len(self)
        }

        fn vertices(&self) -> Vec<Vertex> {
            self.clone()
        }
    }
}
