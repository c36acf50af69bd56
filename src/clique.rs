//! Exact maximum clique search.
//!
//! Carraghan–Pardalos branch and bound: depth first over increasing vertex
//! indices, pruning a node when the partial clique plus all its remaining
//! candidates cannot beat the best clique found so far. The recursion is
//! unrolled into per-depth arrays allocated once up front.

use tracing::debug;

use crate::graph::*;

/// Search state for one graph.
///
/// `candidates` holds `nnodes + 1` bitset rows, row `d` being the vertices
/// adjacent to every member of the partial clique of size `d` that have not
/// been tried at depth `d` yet.
pub struct CliqueSearch<'a> {
    graph: &'a CompactMatrixGraph,
    row_len: usize,
    candidates: Vec<Chunk>,
    remaining: Vec<usize>,
    cursor: Vec<usize>,
    partial: Vec<Node>,
    best: Vec<Node>,
    pub branches: u64,
    pub pruned: u64,
}

impl<'a> CliqueSearch<'a> {
    pub fn new(graph: &'a CompactMatrixGraph) -> Self {
        let n = graph.nnodes();
        let row_len = graph.row_len();
        let mut candidates = vec![0; (n + 1) * row_len];
        for v in 0..n {
            candidates[v / CHUNK_SIZE] |= 1 << (v % CHUNK_SIZE);
        }
        let mut remaining = vec![0; n + 1];
        remaining[0] = n;
        CliqueSearch {
            graph,
            row_len,
            candidates,
            remaining,
            cursor: vec![0; n + 1],
            partial: Vec::with_capacity(n),
            best: Vec::with_capacity(n),
            branches: 0,
            pruned: 0,
        }
    }

    /// pops the lowest untried candidate at `depth`
    fn next_candidate(&mut self, depth: usize) -> Option<Node> {
        let base = depth * self.row_len;
        let mut h = self.cursor[depth] / CHUNK_SIZE;
        while h < self.row_len {
            let bits = self.candidates[base + h];
            if bits != 0 {
                let l = bits.trailing_zeros() as usize;
                self.candidates[base + h] &= !(1 << l);
                let v = h * CHUNK_SIZE + l;
                self.cursor[depth] = v + 1;
                self.remaining[depth] -= 1;
                return Some(v as Node);
            }
            h += 1;
        }
        self.cursor[depth] = self.row_len * CHUNK_SIZE;
        return None;
    }

    /// C_{d+1} = C_d ∩ N(v)
    fn descend(&mut self, depth: usize, v: Node) {
        let row_len = self.row_len;
        let (lower, upper) = self.candidates.split_at_mut((depth + 1) * row_len);
        let current = &lower[depth * row_len..];
        let next = &mut upper[..row_len];
        let adjacent = self.graph.row(v);
        let mut count = 0;
        for h in 0..row_len {
            next[h] = current[h] & adjacent[h];
            count += next[h].count_ones() as usize;
        }
        self.remaining[depth + 1] = count;
        self.cursor[depth + 1] = v as usize + 1;
    }

    /// runs the search to completion and returns the first maximum clique found, sorted ascending
    pub fn run(&mut self) -> Vec<Node> {
        let mut depth = 0;
        loop {
            let exhausted = if depth + self.remaining[depth] <= self.best.len() {
                self.pruned += 1;
                true
            } else if let Some(v) = self.next_candidate(depth) {
                self.branches += 1;
                self.descend(depth, v);
                self.partial.push(v);
                depth += 1;
                if depth > self.best.len() {
                    self.best.clear();
                    self.best.extend_from_slice(&self.partial);
                }
                false
            } else {
                true
            };
            if exhausted {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                self.partial.pop();
            }
        }
        return self.best.clone();
    }
}

/// one maximum clique of `graph`
/// ```
/// use evil_cliques::graph::*;
/// use evil_cliques::clique::maximum_clique;
/// let g = CompactMatrixGraph::from_edges(4, &[[0, 1], [1, 2], [0, 2], [2, 3]]).unwrap();
/// assert_eq!(maximum_clique(&g), vec![0, 1, 2]);
/// ```
pub fn maximum_clique(graph: &CompactMatrixGraph) -> Vec<Node> {
    let mut search = CliqueSearch::new(graph);
    let clique = search.run();
    debug!(nnodes = graph.nnodes(), size = clique.len(), branches = search.branches, pruned = search.pruned, "maximum clique search finished");
    return clique;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use proptest::prelude::*;

    /// largest clique size by checking every vertex subset
    fn brute_force_clique_number(g: &CompactMatrixGraph) -> usize {
        let n = g.nnodes();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let vs: Vec<Node> = (0..n as Node).filter(|v| mask & (1 << v) != 0).collect();
            if vs.len() > best && g.is_clique(&vs) {
                best = vs.len();
            }
        }
        best
    }

    #[test]
    fn find_cliques() {
        let g = fixtures::gengraph();
        assert_eq!(maximum_clique(&g), vec![0, 2, 5, 6]);
    }

    #[test]
    fn complete_graph() {
        let g = CompactMatrixGraph::complete(4);
        assert_eq!(maximum_clique(&g), vec![0, 1, 2, 3]);
        let g = CompactMatrixGraph::complete(130);
        assert_eq!(maximum_clique(&g).len(), 130);
    }

    #[test]
    fn edgeless_and_empty() {
        let g = CompactMatrixGraph::new_disconnected(3);
        assert_eq!(maximum_clique(&g), vec![0]);
        let g = CompactMatrixGraph::new_disconnected(0);
        assert_eq!(maximum_clique(&g), Vec::<Node>::new());
    }

    #[test]
    fn first_found_wins_ties() {
        let g = fixtures::two_triangles();
        assert_eq!(maximum_clique(&g), vec![0, 1, 2]);
    }

    #[test]
    fn crosses_chunk_boundaries() {
        // clique on 60..70 hidden in a sparse path
        let mut g = CompactMatrixGraph::new_disconnected(100);
        for v in 0..99 {
            g.add_edge(v, v + 1);
        }
        for a in 60..70 {
            for b in (a + 1)..70 {
                g.add_edge(a, b);
            }
        }
        assert_eq!(maximum_clique(&g), (60..70).collect::<Vec<Node>>());
    }

    #[test]
    fn pruning_happens() {
        let g = fixtures::gengraph();
        let mut search = CliqueSearch::new(&g);
        search.run();
        assert!(search.pruned > 0);
        assert!(search.branches > 0);
    }

    proptest! {
        #[test]
        fn result_is_a_maximum_clique((n, mask) in (0usize..=11).prop_flat_map(|n| (Just(n), prop::collection::vec(any::<bool>(), n * n.saturating_sub(1) / 2)))) {
            let g = fixtures::from_pair_mask(n, &mask);
            let clique = maximum_clique(&g);
            prop_assert!(g.is_clique(&clique));
            prop_assert_eq!(clique.len(), brute_force_clique_number(&g));
        }
    }
}
