use thiserror::Error;

use crate::graph::Node;

/// Errors raised while loading, validating or composing graphs.
#[derive(Debug, Error)]
pub enum Error {
    /// Adjacency handed to the core violates symmetry or loop-freeness.
    #[error("malformed graph at ({a}, {b}): {reason}")]
    MalformedGraph { a: Node, b: Node, reason: &'static str },

    #[error("vertex {node} out of range for a graph with {nnodes} vertices")]
    NodeOutOfRange { node: Node, nnodes: usize },

    #[error("composition request has no input graphs")]
    EmptyRequest,

    #[error("input graph {index} has multiplicity 0")]
    ZeroMultiplicity { index: usize },

    #[error("background probability {0} is not in [0, 1]")]
    InvalidProbability(f64),

    #[error("vertex count of the combined graph overflows at input graph {index}")]
    SizeOverflow { index: usize },

    #[error("combined graph with {0} vertices does not fit the vertex index type")]
    TooLarge(usize),

    /// Textual graph input could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
