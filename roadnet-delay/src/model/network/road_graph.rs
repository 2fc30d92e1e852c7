use super::{
    AdjacencyDirection as Dir, AdjacencyList, CoordKey, EdgesByOd, NetworkError, RoadEdge,
    RoadNode, RoadNodes,
};
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};

/// directed multigraph over road nodes keyed by coordinate. parallel edges
/// between the same pair of nodes are stored side by side in insertion order.
#[derive(Default, Debug, Clone)]
pub struct RoadGraph {
    /// node data stored by coordinate
    nodes: RoadNodes,
    /// edges are stored wrt their src/dst node pairs
    edges: EdgesByOd,
    /// forward and reverse adjacency list. every node has both entries.
    adj: AdjacencyList,
}

impl RoadGraph {
    pub fn empty() -> RoadGraph {
        RoadGraph {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            adj: HashMap::new(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// since this is a multigraph, there may be more than 1 edge between some pair (u, v)
    pub fn n_edges(&self) -> usize {
        self.edges.values().map(|multiedges| multiedges.len()).sum()
    }

    pub fn contains_node(&self, node: &CoordKey) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn get_node(&self, node: &CoordKey) -> Result<&RoadNode, NetworkError> {
        self.nodes
            .get(node)
            .ok_or(NetworkError::GraphMissingNode(*node))
    }

    /// adds a node with empty adjacencies. fails if the coordinate is already
    /// present.
    pub fn insert_node(&mut self, node: RoadNode) -> Result<(), NetworkError> {
        let coord = node.coord;
        if self.nodes.contains_key(&coord) {
            return Err(NetworkError::DuplicateNode(coord));
        }
        let _ = self.nodes.insert(coord, node);
        let _ = self.adj.insert((coord, Dir::Forward), BTreeSet::new());
        let _ = self.adj.insert((coord, Dir::Reverse), BTreeSet::new());
        Ok(())
    }

    /// appends a directed edge between two existing nodes.
    pub fn add_edge(&mut self, edge: RoadEdge) -> Result<(), NetworkError> {
        let src = edge.src;
        let dst = edge.dst;
        self.adjacencies_mut(&src, Dir::Forward)?.insert(dst);
        self.adjacencies_mut(&dst, Dir::Reverse)?.insert(src);
        self.edges.entry((src, dst)).or_default().push(edge);
        Ok(())
    }

    /// the parallel edges from src to dst, in insertion order.
    pub fn get_edges(&self, src: &CoordKey, dst: &CoordKey) -> Result<&[RoadEdge], NetworkError> {
        self.edges
            .get(&(*src, *dst))
            .map(|multiedges| multiedges.as_slice())
            .ok_or(NetworkError::GraphMissingEdge(*src, *dst))
    }

    /// the adjacent nodes in some direction, in ascending coordinate order.
    pub fn neighbors(
        &self,
        node: &CoordKey,
        direction: Dir,
    ) -> Result<&BTreeSet<CoordKey>, NetworkError> {
        self.adj
            .get(&(*node, direction))
            .ok_or(NetworkError::AdjacencyMissingNode(*node, direction))
    }

    pub fn successors(&self, node: &CoordKey) -> Result<&BTreeSet<CoordKey>, NetworkError> {
        self.neighbors(node, Dir::Forward)
    }

    pub fn predecessors(&self, node: &CoordKey) -> Result<&BTreeSet<CoordKey>, NetworkError> {
        self.neighbors(node, Dir::Reverse)
    }

    pub fn has_successor(&self, node: &CoordKey, successor: &CoordKey) -> bool {
        self.adj
            .get(&(*node, Dir::Forward))
            .map(|adjacencies| adjacencies.contains(successor))
            .unwrap_or(false)
    }

    /// the undirected view of the adjacencies of a node.
    pub fn undirected_neighbors(&self, node: &CoordKey) -> Result<BTreeSet<CoordKey>, NetworkError> {
        let fwd = self.successors(node)?;
        let rev = self.predecessors(node)?;
        Ok(fwd.union(rev).copied().collect())
    }

    /// number of edges leaving or entering a node for some direction, counting
    /// parallel edges separately.
    pub fn degree_for_direction(&self, node: &CoordKey, direction: Dir) -> Result<usize, NetworkError> {
        let degree = self
            .neighbors(node, direction)?
            .iter()
            .map(|other| {
                let od = match direction {
                    Dir::Forward => (*node, *other),
                    Dir::Reverse => (*other, *node),
                };
                self.edges.get(&od).map(|m| m.len()).unwrap_or_default()
            })
            .sum();
        Ok(degree)
    }

    pub fn out_degree(&self, node: &CoordKey) -> Result<usize, NetworkError> {
        self.degree_for_direction(node, Dir::Forward)
    }

    pub fn in_degree(&self, node: &CoordKey) -> Result<usize, NetworkError> {
        self.degree_for_direction(node, Dir::Reverse)
    }

    /// total degree. a self-loop contributes once to each direction.
    pub fn degree(&self, node: &CoordKey) -> Result<usize, NetworkError> {
        Ok(self.in_degree(node)? + self.out_degree(node)?)
    }

    /// removes a node along with every edge touching it. the opposite
    /// adjacency entries of its neighbors are cleaned up as well.
    pub fn remove_node(&mut self, node: &CoordKey) -> Result<RoadNode, NetworkError> {
        let removed = self
            .nodes
            .remove(node)
            .ok_or(NetworkError::GraphMissingNode(*node))?;
        let successors = self.adj.remove(&(*node, Dir::Forward)).unwrap_or_default();
        let predecessors = self.adj.remove(&(*node, Dir::Reverse)).unwrap_or_default();
        for dst in successors.iter() {
            let _ = self.edges.remove(&(*node, *dst));
            if let Some(adjacencies) = self.adj.get_mut(&(*dst, Dir::Reverse)) {
                adjacencies.remove(node);
            }
        }
        for src in predecessors.iter() {
            let _ = self.edges.remove(&(*src, *node));
            if let Some(adjacencies) = self.adj.get_mut(&(*src, Dir::Forward)) {
                adjacencies.remove(node);
            }
        }
        Ok(removed)
    }

    /// node coordinates in ascending order, to guarantee idempotency on repeated runs.
    pub fn sorted_nodes(&self) -> Vec<&CoordKey> {
        self.nodes.keys().sorted().collect_vec()
    }

    pub fn sorted_node_data(&self) -> Vec<&RoadNode> {
        self.nodes
            .iter()
            .sorted_by_key(|(coord, _)| **coord)
            .map(|(_, node)| node)
            .collect_vec()
    }

    /// every edge of the graph ordered by (src, dst) and then by insertion
    /// order within a multiedge set.
    pub fn sorted_edges(&self) -> Vec<&RoadEdge> {
        self.edges
            .iter()
            .sorted_by_key(|(od, _)| **od)
            .flat_map(|(_, multiedges)| multiedges.iter())
            .collect_vec()
    }

    fn adjacencies_mut(
        &mut self,
        node: &CoordKey,
        direction: Dir,
    ) -> Result<&mut BTreeSet<CoordKey>, NetworkError> {
        self.adj
            .get_mut(&(*node, direction))
            .ok_or(NetworkError::AdjacencyMissingNode(*node, direction))
    }
}
