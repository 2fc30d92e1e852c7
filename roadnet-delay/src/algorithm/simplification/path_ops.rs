use super::SimplifiedPath;
use crate::model::network::{CoordKey, NetworkError, RoadGraph};
use itertools::Itertools;
use kdam::tqdm;
use std::collections::{BTreeSet, HashMap, HashSet};

/// extends a path that starts `[endpoint, successor]` by following successors
/// until an endpoint is reached. at each step the first successor in ascending
/// coordinate order that is not already on the path is taken.
///
/// when the walk runs out of successors at a node that is not an endpoint but
/// leads back to the first node of the path, the path is closed into a ring
/// by appending the first node again.
///
/// the walk fails with [`NetworkError::PathRecursionLimitExceeded`] if the path
/// would grow past `max_path_length` nodes.
pub fn build_path(
    graph: &RoadGraph,
    start: CoordKey,
    successor: CoordKey,
    endpoints: &BTreeSet<CoordKey>,
    max_path_length: usize,
) -> Result<Vec<CoordKey>, NetworkError> {
    let mut path = vec![start, successor];
    let mut visited: HashSet<CoordKey> = HashSet::from([start, successor]);
    let mut current = successor;

    if !endpoints.contains(&successor) {
        while let Some(next) = graph
            .successors(&current)?
            .iter()
            .find(|n| !visited.contains(*n))
            .copied()
        {
            if path.len() >= max_path_length {
                return Err(NetworkError::PathRecursionLimitExceeded {
                    start,
                    successor,
                    limit: max_path_length,
                });
            }
            path.push(next);
            let _ = visited.insert(next);
            if endpoints.contains(&next) {
                return Ok(path);
            }
            current = next;
        }
    } else {
        return Ok(path);
    }

    if !endpoints.contains(&current) && graph.has_successor(&current, &start) {
        path.push(start);
    }
    Ok(path)
}

/// collects a path for every successor of every endpoint that is not itself
/// an endpoint. endpoints and successors are visited in ascending coordinate
/// order. paths whose walk fails are logged and returned separately so the
/// nodes along them stay unsimplified.
pub fn paths_to_simplify(
    graph: &RoadGraph,
    endpoints: &BTreeSet<CoordKey>,
    max_path_length: usize,
) -> Result<(Vec<SimplifiedPath>, Vec<NetworkError>), NetworkError> {
    let mut paths: Vec<SimplifiedPath> = vec![];
    let mut failures: Vec<NetworkError> = vec![];
    let iter = tqdm!(
        endpoints.iter(),
        desc = "find paths to simplify",
        total = endpoints.len()
    );
    for endpoint in iter {
        for successor in graph.successors(endpoint)?.iter() {
            if endpoints.contains(successor) {
                continue;
            }
            match build_path(graph, *endpoint, *successor, endpoints, max_path_length) {
                Ok(path) => paths.push(SimplifiedPath::new(path)?),
                Err(e @ NetworkError::PathRecursionLimitExceeded { .. }) => {
                    log::warn!("{e}, skipping path");
                    failures.push(e);
                }
                Err(e) => return Err(e),
            }
        }
    }
    log::info!(
        "found {} paths to simplify ({} skipped)",
        paths.len(),
        failures.len()
    );
    Ok((paths, failures))
}

/// reports every directed node pair that is consumed by more than one path.
/// under correct input topology each interstitial segment belongs to exactly
/// one path; overlaps are logged and returned for inspection.
pub fn overlapping_segments(paths: &[SimplifiedPath]) -> Vec<(CoordKey, CoordKey)> {
    let mut counts: HashMap<(CoordKey, CoordKey), usize> = HashMap::new();
    for path in paths.iter() {
        for (u, v) in path.node_pairs() {
            *counts.entry((*u, *v)).or_default() += 1;
        }
    }
    let overlaps = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(od, _)| od)
        .sorted()
        .collect_vec();
    for (u, v) in overlaps.iter() {
        log::warn!("segment {u} -> {v} is part of more than one simplified path");
    }
    overlaps
}
