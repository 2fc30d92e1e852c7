use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// side of the adjacency list being read. forward entries hold the successors
/// of a node, reverse entries hold its predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyDirection {
    Forward,
    Reverse,
}

impl Display for AdjacencyDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjacencyDirection::Forward => write!(f, "successor"),
            AdjacencyDirection::Reverse => write!(f, "predecessor"),
        }
    }
}
