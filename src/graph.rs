pub type Node = u32;

/// unordered vertex pair, listed with the smaller vertex first
pub type Edge = [Node; 2];

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

pub trait UndirectedGraph {
    fn has_edge(&self, a: Node, b: Node) -> bool;
    fn add_edge(&mut self, a: Node, b: Node);
    fn remove_edge(&mut self, a: Node, b: Node);
    fn nnodes(&self) -> usize;
    type NodeIterator: Iterator<Item=Node>;
    fn iter_nodes(&self) -> Self::NodeIterator;

    /// every edge exactly once, as `[a, b]` with `a < b`
    fn edges(&self) -> Vec<Edge> {
        let mut edges = vec![];
        for a in self.iter_nodes() {
            for b in self.iter_nodes().filter(|&b| b > a) {
                if self.has_edge(a, b) {
                    edges.push([a, b]);
                }
            }
        }
        return edges
    }
    fn set_edge(&mut self, a: Node, b: Node, create: bool) {
        if create {
            self.add_edge(a, b);
        }
        else {
            self.remove_edge(a, b);
        }
    }

    fn neighbors(&self, v: Node) -> Vec<Node>{
        let mut res = vec![];
        for u in self.iter_nodes() {
            if self.has_edge(v, u) {
                res.push(u);
            }
        }
        return res;
    }

    fn degree(&self, v: Node) -> usize {
        self.iter_nodes().filter(|&u| self.has_edge(v, u)).count()
    }
}

pub trait UndirectedGraphNew: UndirectedGraph + Sized {
    fn new_disconnected(nnodes: usize) -> Self;

    /// induced subgraph; vertex `i` of the result is `vertices[i]` of `ori`.
    /// `vertices` must not contain duplicates.
    fn subgraph<G: UndirectedGraph>(ori: &G, vertices: &[Node]) -> Self {
        let mut sub = Self::new_disconnected(vertices.len());
        for (new_a, &ori_a) in (0..).zip(vertices.iter()) {
            for (new_b, &ori_b) in (0..).zip(vertices.iter()).skip(new_a as usize + 1) {
                if ori.has_edge(ori_a, ori_b) {
                    sub.add_edge(new_a, new_b);
                }
            }
        }
        return sub;
    }
    fn copy<G: UndirectedGraph>(g: &G) -> Self {
        let mut n = Self::new_disconnected(g.nnodes());
        for [a,b] in g.edges() {
            n.add_edge(a, b);
        }
        return n
    }
}

pub trait UndirectedGraphExt: UndirectedGraph {
    fn nedges(&self) -> usize {
        self.edges().len()
    }

    /// edges / (n(n-1)/2); graphs with fewer than two vertices have density 0
    fn density(&self) -> f64 {
        let n = self.nnodes();
        if n < 2 {
            return 0.;
        }
        let pairs = n * (n - 1) / 2;
        return self.nedges() as f64 / pairs as f64;
    }

    fn degrees(&self) -> Vec<usize> {
        self.iter_nodes().map(|v| self.degree(v)).collect()
    }

    /// true iff every two distinct vertices of `vertices` are adjacent
    fn is_clique(&self, vertices: &[Node]) -> bool {
        for (i, &a) in vertices.iter().enumerate() {
            for &b in &vertices[i+1..] {
                if a == b || !self.has_edge(a, b) {
                    return false;
                }
            }
        }
        return true;
    }

    /// checks symmetry and absence of self-loops
    fn validate(&self) -> Result<()> {
        for a in self.iter_nodes() {
            if self.has_edge(a, a) {
                return Err(Error::MalformedGraph { a, b: a, reason: "self-loop" });
            }
            for b in self.iter_nodes().filter(|&b| b > a) {
                if self.has_edge(a, b) != self.has_edge(b, a) {
                    return Err(Error::MalformedGraph { a, b, reason: "asymmetric adjacency" });
                }
            }
        }
        Ok(())
    }
}

impl<G: UndirectedGraph> UndirectedGraphExt for G {}


/// undirected edge pair to index in triangular adjacency matrix
/// ```
/// use evil_cliques::graph::*;
/// assert_eq!(edge_id(1, 0), 0);
/// assert_eq!(edge_id(2, 0), 1);
/// assert_eq!(edge_id(2, 1), 2);
/// assert_eq!(edge_id(3, 0), 3);
/// assert_eq!(edge_id(3, 1), 4);
/// assert_eq!(edge_id(3, 2), 5);
/// ```
pub fn edge_id(a: Node, b: Node) -> usize{
    assert!(a > b);
    return (a as usize) * ((a as usize)-1) / 2 + (b as usize);
}

pub type Chunk = u64;
pub const CHUNK_SIZE: usize = Chunk::BITS as usize;

/// number of chunks needed for a bitset over `nnodes` vertices
pub fn row_len(nnodes: usize) -> usize {
    (nnodes + CHUNK_SIZE - 1) / CHUNK_SIZE
}

/// Bit-packed symmetric adjacency matrix.
///
/// Both `(a, b)` and `(b, a)` bits are written on every mutation, so the
/// matrix stays symmetric. The diagonal is never set.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactMatrixGraph {
    nnodes: usize,
    row_len: usize,
    matrix: Vec<Chunk>,
}

impl std::fmt::Debug for CompactMatrixGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        return write!(f, "A graph with {} nodes and the following edges: {:?}", self.nnodes, self.edges());
    }
}

impl CompactMatrixGraph {
    /// builds a graph from 0-based edges, rejecting out of range vertices and self-loops.
    /// ```
    /// use evil_cliques::graph::*;
    /// let g = CompactMatrixGraph::from_edges(3, &[[0, 1], [2, 1]]).unwrap();
    /// assert!(g.has_edge(1, 0));
    /// assert_eq!(g.edges(), vec![[0, 1], [1, 2]]);
    /// assert!(CompactMatrixGraph::from_edges(3, &[[1, 1]]).is_err());
    /// ```
    pub fn from_edges(nnodes: usize, edges: &[Edge]) -> Result<Self> {
        let mut g = Self::new_disconnected(nnodes);
        for &[a, b] in edges {
            if a as usize >= nnodes || b as usize >= nnodes {
                return Err(Error::NodeOutOfRange { node: std::cmp::max(a, b), nnodes });
            }
            if a == b {
                return Err(Error::MalformedGraph { a, b, reason: "self-loop" });
            }
            g.add_edge(a, b);
        }
        return Ok(g);
    }

    /// the complete graph on `nnodes` vertices
    pub fn complete(nnodes: usize) -> Self {
        let mut g = Self::new_disconnected(nnodes);
        for a in g.iter_nodes() {
            for b in (a+1)..(nnodes as Node) {
                g.add_edge(a, b);
            }
        }
        return g;
    }

    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// neighbourhood of `v` as a bitset of `row_len()` chunks
    pub fn row(&self, v: Node) -> &[Chunk] {
        let offset = self.row_len * v as usize;
        &self.matrix[offset .. offset + self.row_len]
    }

    fn check_bounds(&self, a: Node, b: Node) {
        if a as usize >= self.nnodes {
            panic!("node out of bounds: {} >= {}", a, self.nnodes);
        }
        if b as usize >= self.nnodes {
            panic!("node out of bounds: {} >= {}", b, self.nnodes);
        }
    }

    fn write_bit(&mut self, from: Node, to: Node, value: bool) {
        let toh = to as usize / CHUNK_SIZE;
        let tol = to as usize % CHUNK_SIZE;
        let cell = &mut self.matrix[from as usize * self.row_len + toh];
        if value {
            *cell |= 1<<tol;
        } else {
            *cell &= !(1<<tol);
        }
    }
}

impl UndirectedGraphNew for CompactMatrixGraph {
    fn new_disconnected(nnodes: usize) -> Self {
        let row_len = row_len(nnodes);
        let matsize = row_len.checked_mul(nnodes).expect("size of adjacency matrix overflows");
        let matrix = vec![0; matsize];
        CompactMatrixGraph { matrix, row_len, nnodes }
    }
}

impl UndirectedGraph for CompactMatrixGraph {
    fn nnodes(&self) -> usize {
        return self.nnodes;
    }
    fn has_edge(&self, a: Node, b: Node) -> bool {
        self.check_bounds(a, b);
        let bh = b as usize / CHUNK_SIZE;
        let bl = b as usize % CHUNK_SIZE;
        return self.matrix[a as usize * self.row_len + bh] & (1<<bl) != 0;
    }
    type NodeIterator = std::ops::Range<Node>;
    fn iter_nodes(&self) -> Self::NodeIterator {
        0 .. (self.nnodes as Node)
    }
    fn add_edge(&mut self, a: Node, b: Node) {
        self.check_bounds(a, b);
        assert_ne!(a, b, "self-loops are not allowed");
        self.write_bit(a, b, true);
        self.write_bit(b, a, true);
    }
    fn remove_edge(&mut self, a: Node, b: Node) {
        self.check_bounds(a, b);
        self.write_bit(a, b, false);
        self.write_bit(b, a, false);
    }

    fn edges(&self) -> Vec<Edge> {
        let mut result = vec![];
        for a in 0 .. self.nnodes {
            for (bh, &chunk) in self.row(a as Node).iter().enumerate() {
                let mut bits = chunk;
                while bits != 0 {
                    let bl = bits.trailing_zeros();
                    bits &= !(1<<bl);
                    let b = bh as u32 * Chunk::BITS | bl;
                    if b as usize > a {
                        result.push([a as Node, b]);
                    }
                }
            }
        }
        result
    }
    /// ```
    /// use evil_cliques::graph::*;
    /// let mut g = CompactMatrixGraph::new_disconnected(5);
    /// g.add_edge(2, 3);
    /// assert_eq!(g.neighbors(2), vec![3]);
    /// assert_eq!(g.neighbors(3), vec![2]);
    /// ```
    fn neighbors(&self, v: Node) -> Vec<Node> {
        let mut result = vec![];
        for (uh, &chunk) in self.row(v).iter().enumerate() {
            let mut bits = chunk;
            while bits != 0 {
                let ul = bits.trailing_zeros();
                bits &= !(1<<ul);
                result.push(uh as u32 * Chunk::BITS | ul);
            }
        }
        result
    }
    fn degree(&self, v: Node) -> usize {
        self.row(v).iter().map(|c| c.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn symmetric_mutation() {
        let mut g = CompactMatrixGraph::new_disconnected(70);
        g.add_edge(3, 66);
        assert!(g.has_edge(66, 3));
        assert_eq!(g.degree(3), 1);
        assert_eq!(g.degree(66), 1);
        g.remove_edge(66, 3);
        assert!(!g.has_edge(3, 66));
        assert_eq!(g.nedges(), 0);
        g.set_edge(1, 65, true);
        assert_eq!(g.edges(), vec![[1, 65]]);
        assert!(g.validate().is_ok());
    }

    #[test]
    #[should_panic]
    fn self_loop_panics() {
        let mut g = CompactMatrixGraph::new_disconnected(3);
        g.add_edge(1, 1);
    }

    #[test]
    fn density_and_degrees() {
        let g = fixtures::gengraph();
        assert_eq!(g.nedges(), 10);
        assert!((g.density() - 10. / 21.).abs() < 1e-12);
        assert_eq!(g.degrees(), vec![4, 3, 5, 2, 0, 3, 3]);
        assert_eq!(CompactMatrixGraph::complete(6).nedges(), 15);
        assert_eq!(CompactMatrixGraph::new_disconnected(1).density(), 0.);
    }

    #[test]
    fn cliques_and_subgraphs() {
        let g = fixtures::gengraph();
        assert!(g.is_clique(&[0, 2, 5, 6]));
        assert!(g.is_clique(&[4]));
        assert!(g.is_clique(&[]));
        assert!(!g.is_clique(&[0, 1, 3]));
        assert!(!g.is_clique(&[2, 2]));

        let sub = CompactMatrixGraph::subgraph(&g, &[6, 5, 2, 0]);
        assert_eq!(sub, CompactMatrixGraph::complete(4));
        let copy = CompactMatrixGraph::copy(&g);
        assert_eq!(copy, g);
    }

    #[test]
    fn from_edges_range_check() {
        assert!(matches!(
            CompactMatrixGraph::from_edges(3, &[[0, 3]]),
            Err(Error::NodeOutOfRange { node: 3, nnodes: 3 })
        ));
    }
}
