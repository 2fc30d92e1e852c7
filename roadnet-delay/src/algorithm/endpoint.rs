use crate::model::network::{CoordKey, NetworkError, RoadGraph};
use kdam::tqdm;
use std::collections::BTreeSet;

/// true if the node is a "real" endpoint of an edge in the network rather
/// than a shape point along a street. an endpoint either:
///   1. is its own neighbor (self-loop),
///   2. has no incoming or no outgoing edges,
///   3. does not have exactly two neighbors together with a degree of 2 or 4.
///
/// a degree of 3 between two neighbors marks a change between one-way and
/// two-way traffic, higher degrees mark parallel edges.
pub fn is_endpoint(graph: &RoadGraph, node: &CoordKey) -> Result<bool, NetworkError> {
    let neighbors = graph.undirected_neighbors(node)?;
    if neighbors.contains(node) {
        return Ok(true);
    }
    if graph.in_degree(node)? == 0 || graph.out_degree(node)? == 0 {
        return Ok(true);
    }
    let degree = graph.degree(node)?;
    Ok(!(neighbors.len() == 2 && (degree == 2 || degree == 4)))
}

/// classifies every node of the graph once, in ascending coordinate order.
pub fn find_endpoints(graph: &RoadGraph) -> Result<BTreeSet<CoordKey>, NetworkError> {
    let nodes = graph.sorted_nodes();
    let n_nodes = nodes.len();
    let mut endpoints = BTreeSet::new();
    for node in tqdm!(nodes.into_iter(), desc = "find endpoints", total = n_nodes) {
        if is_endpoint(graph, node)? {
            endpoints.insert(*node);
        }
    }
    log::info!("{} of {} nodes are endpoints", endpoints.len(), n_nodes);
    Ok(endpoints)
}
