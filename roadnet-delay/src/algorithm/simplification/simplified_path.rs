use itertools::Itertools;

use crate::model::network::{CoordKey, NetworkError};

/// a chain of nodes from one endpoint to the next, to be collapsed into a
/// single edge.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimplifiedPath {
    pub src: CoordKey,
    pub dst: CoordKey,
    pub path: Vec<CoordKey>,
}

impl SimplifiedPath {
    pub fn new(path: Vec<CoordKey>) -> Result<SimplifiedPath, NetworkError> {
        let (src, dst) = match (path.first(), path.last(), path.len()) {
            (_, _, 0) => {
                return Err(NetworkError::GraphSimplificationError(String::from(
                    "SimplifiedPath::new called with empty path",
                )))
            }
            (_, _, 1) => {
                return Err(NetworkError::GraphSimplificationError(String::from(
                    "SimplifiedPath::new called with invalid path that only contains one node",
                )))
            }
            (Some(src), Some(dst), _) => (*src, *dst),
            _ => {
                return Err(NetworkError::InternalError(String::from(
                    "non-empty path has no source or destination node",
                )))
            }
        };
        Ok(SimplifiedPath { src, dst, path })
    }

    /// consecutive node pairs along the path, in traversal order.
    pub fn node_pairs(&self) -> impl Iterator<Item = (&CoordKey, &CoordKey)> {
        self.path.iter().tuple_windows()
    }

    /// all but the src and dst nodes of this path.
    pub fn interstitial_nodes(&self) -> impl Iterator<Item = &CoordKey> {
        self.path.iter().dropping(1).dropping_back(1)
    }

    /// true when the path returns to the node it started from.
    pub fn is_ring(&self) -> bool {
        self.src == self.dst
    }
}
