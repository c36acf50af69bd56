use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::graph::*;
use crate::util::random_perm;

/// A bijection on `0..len`; vertex `v` is relabelled to `self.map(v)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation(Vec<Node>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Permutation((0..len as Node).collect())
    }

    /// uniformly random permutation
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Permutation(random_perm(0, len, rng).into_iter().map(|v| v as Node).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn map(&self, v: Node) -> Node {
        self.0[v as usize]
    }

    /// ```
    /// use evil_cliques::permutation::Permutation;
    /// let mut rng = rand::thread_rng();
    /// let p = Permutation::random(10, &mut rng);
    /// let q = p.inverse();
    /// for v in 0..10 {
    ///     assert_eq!(q.map(p.map(v)), v);
    /// }
    /// ```
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (i, &p) in (0..).zip(&self.0) {
            inverse[p as usize] = i;
        }
        return Permutation(inverse);
    }

    /// relabels `graph`, consuming it: `new.has_edge(π(a), π(b)) == old.has_edge(a, b)`
    pub fn apply<G: UndirectedGraphNew>(&self, graph: G) -> G {
        assert_eq!(self.len(), graph.nnodes(), "permutation and graph sizes differ");
        let mut relabelled = G::new_disconnected(graph.nnodes());
        for [a, b] in graph.edges() {
            relabelled.add_edge(self.map(a), self.map(b));
        }
        return relabelled;
    }
}
