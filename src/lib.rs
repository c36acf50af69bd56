//! (EVIL) Extremely-hard and Versatile Instance Library for clique search benchmarks.
//!
//! Several input graphs are embedded, each in several copies, into one large
//! graph. The copies are connected by random background edges and one maximum
//! clique of every copy is joined into a single clique, so the clique number
//! of the result is known: it is the sum of the clique numbers of the copies.
//! A random relabelling hides the planted structure.
//!
//! ```
//! use evil_cliques::prelude::*;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256StarStar;
//!
//! let mut rng = Xoshiro256StarStar::seed_from_u64(1);
//! let request = CompositionRequest::new(0.9).with(CompactMatrixGraph::complete(4), 3);
//! let composition = compose(&request, &mut rng).unwrap();
//! assert_eq!(composition.clique_size(), 12);
//! let permutation = Permutation::random(composition.graph.nnodes(), &mut rng);
//! let graph = permutation.apply(composition.graph);
//! assert_eq!(graph.nnodes(), 12);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod graph;

pub mod clique;

pub mod compose;

pub mod permutation;

pub mod io;

pub mod logging;

mod util;
pub use util::short_stem;

pub mod prelude {
    pub use crate::graph::{Node, Edge, CompactMatrixGraph, UndirectedGraph, UndirectedGraphExt, UndirectedGraphNew};
    pub use crate::clique::maximum_clique;
    pub use crate::compose::{compose, Composition, CompositionRequest};
    pub use crate::permutation::Permutation;
}

/// small graphs with known cliques
pub mod fixtures {
    use crate::graph::*;

    /// cliques {0,1,2}, {0,2,5,6}, {1,2,3} and the isolated vertex 4
    pub fn gengraph() -> CompactMatrixGraph {
        let mut g = CompactMatrixGraph::new_disconnected(7);

        // 0,1,2
        g.add_edge(0,1);
        g.add_edge(0,2);
        g.add_edge(1,2);

        // 1,2,3
        g.add_edge(2,3);
        g.add_edge(3,1);

        // 0,2,5,6
        g.add_edge(0,5);
        g.add_edge(0,6);
        g.add_edge(2,5);
        g.add_edge(2,6);
        g.add_edge(5,6);

        // 4 is left over and maximal
        return g
    }

    /// two disjoint triangles {0,1,2} and {3,4,5}
    pub fn two_triangles() -> CompactMatrixGraph {
        let mut g = CompactMatrixGraph::new_disconnected(6);
        for t in [0, 3] {
            g.add_edge(t, t+1);
            g.add_edge(t, t+2);
            g.add_edge(t+1, t+2);
        }
        return g
    }

    /// `mask[edge_id(a, b)]` decides the pair `a > b`
    pub fn from_pair_mask(nnodes: usize, mask: &[bool]) -> CompactMatrixGraph {
        let mut g = CompactMatrixGraph::new_disconnected(nnodes);
        for a in 1..(nnodes as Node) {
            for b in 0..a {
                if mask[edge_id(a, b)] {
                    g.add_edge(a, b);
                }
            }
        }
        return g
    }
}
