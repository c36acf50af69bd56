//! Embedding of several input graphs into one benchmark graph.
//!
//! The combined adjacency matrix is built in three passes over one owned
//! matrix, and a later pass always wins over an earlier one:
//!
//! 1. [`background_fill`]: every vertex pair becomes an edge with probability `p`.
//! 2. [`embed_blocks`]: every block is overwritten with an exact copy of its input graph.
//! 3. [`stitch_cliques`]: the maximum cliques of all blocks are joined into one clique.

use std::ops::Range;

use rand::Rng;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::clique::maximum_clique;
use crate::error::{Error, Result};
use crate::graph::*;

/// An input graph and the number of disjoint copies to embed.
#[derive(Clone, Debug)]
pub struct Component {
    pub graph: CompactMatrixGraph,
    pub multiplicity: usize,
}

#[derive(Clone, Debug)]
pub struct CompositionRequest {
    pub entries: Vec<Component>,
    pub background_probability: f64,
}

impl CompositionRequest {
    pub fn new(background_probability: f64) -> Self {
        CompositionRequest { entries: vec![], background_probability }
    }

    pub fn with(mut self, graph: CompactMatrixGraph, multiplicity: usize) -> Self {
        self.entries.push(Component { graph, multiplicity });
        return self;
    }

    /// vertex count of the combined graph; only meaningful once `validate` passed
    pub fn nnodes(&self) -> usize {
        self.entries.iter().map(|c| c.multiplicity * c.graph.nnodes()).sum()
    }

    /// vertex count of the combined graph, `Err` at the first input that overflows `usize`
    fn checked_nnodes(&self) -> Result<usize> {
        let mut total: usize = 0;
        for (index, c) in self.entries.iter().enumerate() {
            total = c.multiplicity.checked_mul(c.graph.nnodes())
                .and_then(|n| total.checked_add(n))
                .ok_or(Error::SizeOverflow { index })?;
        }
        return Ok(total);
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.background_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability(p));
        }
        if self.entries.is_empty() {
            return Err(Error::EmptyRequest);
        }
        for (index, c) in self.entries.iter().enumerate() {
            if c.multiplicity == 0 {
                return Err(Error::ZeroMultiplicity { index });
            }
            c.graph.validate()?;
        }
        let nnodes = self.checked_nnodes()?;
        if Node::try_from(nnodes).is_err() {
            return Err(Error::TooLarge(nnodes));
        }
        Ok(())
    }
}

/// Copy `copy` of input `source`, placed at `offset..offset + len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub source: usize,
    pub copy: usize,
    pub offset: usize,
    pub len: usize,
}

impl Block {
    pub fn range(&self) -> Range<Node> {
        (self.offset as Node) .. ((self.offset + self.len) as Node)
    }

    /// combined-graph index of input vertex `v`
    pub fn global(&self, v: Node) -> Node {
        debug_assert!((v as usize) < self.len);
        self.offset as Node + v
    }
}

/// Contiguous blocks, all copies of input 0 first, then input 1, ...
/// ```
/// use evil_cliques::compose::*;
/// use evil_cliques::graph::*;
/// let request = CompositionRequest::new(0.5)
///     .with(CompactMatrixGraph::new_disconnected(3), 2)
///     .with(CompactMatrixGraph::new_disconnected(5), 1);
/// let offsets: Vec<usize> = layout(&request).iter().map(|b| b.offset).collect();
/// assert_eq!(offsets, vec![0, 3, 6]);
/// ```
pub fn layout(request: &CompositionRequest) -> Vec<Block> {
    let mut blocks = vec![];
    let mut n0 = 0;
    for (source, c) in request.entries.iter().enumerate() {
        let len = c.graph.nnodes();
        for copy in 0..c.multiplicity {
            blocks.push(Block { source, copy, offset: n0 + copy * len, len });
        }
        n0 += c.multiplicity * len;
    }
    return blocks;
}

#[derive(Clone, Debug)]
pub struct Composition {
    pub graph: CompactMatrixGraph,
    pub blocks: Vec<Block>,
    /// maximum clique of every input, in input coordinates
    pub input_cliques: Vec<Vec<Node>>,
    /// union of the block cliques, in combined coordinates
    pub clique: Vec<Node>,
}

impl Composition {
    pub fn clique_size(&self) -> usize {
        self.clique.len()
    }
}

/// independent coin flip with probability `p` for every unordered pair
pub fn background_fill<R: Rng>(graph: &mut CompactMatrixGraph, p: f64, rng: &mut R) {
    let n = graph.nnodes() as Node;
    for a in 0..n {
        for b in (a+1)..n {
            graph.set_edge(a, b, rng.gen_bool(p));
        }
    }
}

/// overwrites every block with its input graph, edges and non-edges alike
pub fn embed_blocks(graph: &mut CompactMatrixGraph, blocks: &[Block], entries: &[Component]) {
    for block in blocks {
        let input = &entries[block.source].graph;
        for a in input.iter_nodes() {
            for b in (a+1)..(block.len as Node) {
                graph.set_edge(block.global(a), block.global(b), input.has_edge(a, b));
            }
        }
    }
}

/// connects every clique vertex to the clique vertices of all other blocks
pub fn stitch_cliques(graph: &mut CompactMatrixGraph, block_cliques: &[Vec<Node>]) {
    for (i, ci) in block_cliques.iter().enumerate() {
        for cj in &block_cliques[i+1..] {
            for &a in ci {
                for &b in cj {
                    graph.add_edge(a, b);
                }
            }
        }
    }
}

pub fn compose<R: Rng>(request: &CompositionRequest, rng: &mut R) -> Result<Composition> {
    request.validate()?;
    let nnodes = request.nnodes();
    let blocks = layout(request);
    info!(nnodes, blocks = blocks.len(), p = request.background_probability, "composing");

    // inputs are disjoint, so their searches are independent
    let input_cliques: Vec<Vec<Node>> = request.entries.par_iter()
        .map(|c| maximum_clique(&c.graph))
        .collect();
    for (index, (c, clique)) in request.entries.iter().zip(&input_cliques).enumerate() {
        info!(input = index, nnodes = c.graph.nnodes(), clique = clique.len(), multiplicity = c.multiplicity, "input clique");
    }

    let block_cliques: Vec<Vec<Node>> = blocks.iter()
        .map(|b| input_cliques[b.source].iter().map(|&v| b.global(v)).collect())
        .collect();

    let mut graph = CompactMatrixGraph::new_disconnected(nnodes);
    background_fill(&mut graph, request.background_probability, rng);
    debug!(edges = graph.nedges(), "background filled");
    embed_blocks(&mut graph, &blocks, &request.entries);
    debug!(edges = graph.nedges(), "blocks embedded");
    stitch_cliques(&mut graph, &block_cliques);
    debug!(edges = graph.nedges(), "cliques stitched");

    let clique = block_cliques.concat();
    debug_assert!(graph.is_clique(&clique));
    return Ok(Composition { graph, blocks, input_cliques, clique });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn rng() -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(42)
    }

    fn assert_blocks_faithful(request: &CompositionRequest, composition: &Composition) {
        for block in &composition.blocks {
            let vertices: Vec<Node> = block.range().collect();
            let sub = CompactMatrixGraph::subgraph(&composition.graph, &vertices);
            assert_eq!(sub, request.entries[block.source].graph);
        }
    }

    #[test]
    fn duplicated_k4_without_background() {
        let request = CompositionRequest::new(0.).with(CompactMatrixGraph::complete(4), 2);
        let c = compose(&request, &mut rng()).unwrap();
        assert_eq!(c.input_cliques, vec![vec![0, 1, 2, 3]]);
        assert_eq!(c.graph.nnodes(), 8);
        assert_eq!(c.clique_size(), 8);
        assert_eq!(c.graph, CompactMatrixGraph::complete(8));
    }

    #[test]
    fn two_triangles_full_background() {
        let request = CompositionRequest::new(1.)
            .with(CompactMatrixGraph::complete(3), 1)
            .with(CompactMatrixGraph::complete(3), 1);
        let c = compose(&request, &mut rng()).unwrap();
        assert_eq!(c.graph.nnodes(), 6);
        assert_eq!(c.graph.nedges(), 15);
        assert_eq!(c.clique_size(), 6);
    }

    #[test]
    fn zero_background_keeps_only_forced_edges() {
        let request = CompositionRequest::new(0.)
            .with(fixtures::gengraph(), 3)
            .with(fixtures::two_triangles(), 2);
        let c = compose(&request, &mut rng()).unwrap();
        assert_eq!(c.graph.nnodes(), 3 * 7 + 2 * 6);
        assert_eq!(c.clique_size(), 3 * 4 + 2 * 3);
        // 42 block edges plus 153 - 24 stitched pairs between different blocks
        assert_eq!(c.graph.nedges(), 42 + 129);
        assert_blocks_faithful(&request, &c);
    }

    #[test]
    fn blocks_override_background() {
        let request = CompositionRequest::new(0.9)
            .with(fixtures::gengraph(), 2)
            .with(CompactMatrixGraph::new_disconnected(5), 3);
        let c = compose(&request, &mut rng()).unwrap();
        assert_blocks_faithful(&request, &c);
        assert!(c.graph.is_clique(&c.clique));
        assert_eq!(c.clique_size(), 2 * 4 + 3);
        assert!(c.graph.validate().is_ok());
        assert_eq!(c.blocks[2], Block { source: 1, copy: 0, offset: 14, len: 5 });
    }

    #[test]
    fn same_seed_same_graph() {
        let request = CompositionRequest::new(0.5).with(fixtures::gengraph(), 4);
        let a = compose(&request, &mut rng()).unwrap();
        let b = compose(&request, &mut rng()).unwrap();
        assert_eq!(a.graph, b.graph);
    }

    #[test]
    fn rejects_bad_requests() {
        assert!(matches!(compose(&CompositionRequest::new(0.5), &mut rng()), Err(Error::EmptyRequest)));
        let zero = CompositionRequest::new(0.5)
            .with(CompactMatrixGraph::complete(2), 1)
            .with(CompactMatrixGraph::complete(2), 0);
        assert!(matches!(compose(&zero, &mut rng()), Err(Error::ZeroMultiplicity { index: 1 })));
        for p in [-0.1, 1.5, f64::NAN] {
            let bad = CompositionRequest::new(p).with(CompactMatrixGraph::complete(2), 1);
            assert!(matches!(compose(&bad, &mut rng()), Err(Error::InvalidProbability(_))));
        }
    }

    #[test]
    fn rejects_oversized_requests() {
        let huge = CompositionRequest::new(0.5).with(CompactMatrixGraph::complete(2), 1usize << 63);
        assert!(matches!(huge.validate(), Err(Error::SizeOverflow { index: 0 })));

        let sum_overflows = CompositionRequest::new(0.5)
            .with(CompactMatrixGraph::complete(2), usize::MAX / 2)
            .with(CompactMatrixGraph::complete(3), usize::MAX / 3);
        assert!(matches!(compose(&sum_overflows, &mut rng()), Err(Error::SizeOverflow { index: 1 })));

        let too_many_nodes = CompositionRequest::new(0.5).with(CompactMatrixGraph::complete(2), 1usize << 32);
        assert!(matches!(too_many_nodes.validate(), Err(Error::TooLarge(_))));
    }

    proptest! {
        #[test]
        fn composed_clique_is_sum_of_input_cliques(
            inputs in prop::collection::vec(
                (1usize..=8).prop_flat_map(|n| (
                    Just(n),
                    prop::collection::vec(any::<bool>(), n * (n - 1) / 2),
                    1usize..=3,
                )),
                1..=3,
            ),
            p in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let mut request = CompositionRequest::new(p);
            for (n, mask, k) in &inputs {
                request = request.with(fixtures::from_pair_mask(*n, mask), *k);
            }
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let c = compose(&request, &mut rng).unwrap();

            let expected: usize = request.entries.iter()
                .map(|e| e.multiplicity * maximum_clique(&e.graph).len())
                .sum();
            prop_assert_eq!(c.clique_size(), expected);
            prop_assert_eq!(c.graph.nnodes(), request.nnodes());
            prop_assert!(c.graph.is_clique(&c.clique));
            prop_assert!(c.graph.validate().is_ok());
            for block in &c.blocks {
                let vertices: Vec<Node> = block.range().collect();
                let sub = CompactMatrixGraph::subgraph(&c.graph, &vertices);
                prop_assert_eq!(&sub, &request.entries[block.source].graph);
            }
        }
    }
}
