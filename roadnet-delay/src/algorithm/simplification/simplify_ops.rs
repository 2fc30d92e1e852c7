use super::{
    attribute_merge::merge_attributes, line_merge::merge_lines, path_ops, SimplifiedPath,
};
use crate::{
    algorithm::endpoint::find_endpoints,
    model::network::{
        CoordKey, NetworkError, NetworkTables, RoadEdge, RoadGraph, WKT_KEY,
    },
};
use kdam::tqdm;
use std::collections::{BTreeMap, BTreeSet};
use wkt::ToWkt;

/// parameters of a simplification pass.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyOptions<'a> {
    /// attribute keys that always remain full ordered lists
    pub accumulator_keys: &'a [&'a str],
    /// longest node chain a single path may contain
    pub max_path_length: usize,
}

/// removes all nodes that are not intersections, dead ends or self-loops,
/// replacing each chain of interstitial nodes with one edge between the
/// endpoints bracketing it. the merged edge carries the merged attributes,
/// the merged geometry and the original geometries it was built from.
///
/// endpoints are classified once on the input graph. all merged edges are
/// inserted before the interstitial nodes are removed in one batch. the
/// input graph is not modified.
pub fn simplify_graph(graph: &RoadGraph, options: &SimplifyOptions) -> Result<RoadGraph, NetworkError> {
    let endpoints = find_endpoints(graph)?;
    let (paths, _skipped) =
        path_ops::paths_to_simplify(graph, &endpoints, options.max_path_length)?;
    let _ = path_ops::overlapping_segments(&paths);

    let mut result = graph.clone();
    let mut nodes_to_remove: BTreeSet<CoordKey> = BTreeSet::new();
    let mut edges_to_add: BTreeMap<(CoordKey, CoordKey), RoadEdge> = BTreeMap::new();

    let n_paths = paths.len();
    for path in tqdm!(paths.iter(), desc = "merge simplified paths", total = n_paths) {
        if path.path.len() < 3 {
            continue;
        }
        let merged = merge_path(graph, path, options.accumulator_keys)?;
        nodes_to_remove.extend(path.interstitial_nodes().copied());
        if edges_to_add.insert((path.src, path.dst), merged).is_some() {
            log::warn!(
                "more than one simplified path runs from {} to {}, keeping the last one",
                path.src,
                path.dst
            );
        }
    }

    let n_added = edges_to_add.len();
    for edge in edges_to_add.into_values() {
        result.add_edge(edge)?;
    }
    for node in nodes_to_remove.iter() {
        if result.contains_node(node) {
            let _ = result.remove_node(node)?;
        }
    }
    log::info!(
        "simplified graph: added {} merged edges, removed {} interstitial nodes, {} nodes and {} edges remain",
        n_added,
        nodes_to_remove.len(),
        result.n_nodes(),
        result.n_edges()
    );
    Ok(result)
}

/// simplifies the graph and derives its node and edge tables.
pub fn simplify_network(
    graph: &RoadGraph,
    options: &SimplifyOptions,
) -> Result<(RoadGraph, NetworkTables), NetworkError> {
    let simplified = simplify_graph(graph, options)?;
    let tables = NetworkTables::from_graph(&simplified)?;
    Ok((simplified, tables))
}

/// collapses the edges along a path into a single edge. where a pair of
/// nodes has parallel edges, the first one is used.
fn merge_path(
    graph: &RoadGraph,
    path: &SimplifiedPath,
    accumulator_keys: &[&str],
) -> Result<RoadEdge, NetworkError> {
    let edges = path
        .node_pairs()
        .map(|(u, v)| {
            graph
                .get_edges(u, v)?
                .first()
                .ok_or(NetworkError::GraphMissingEdge(*u, *v))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let bags = edges.iter().map(|e| &e.attributes).collect::<Vec<_>>();
    let mut attributes = merge_attributes(&bags, accumulator_keys);

    let geometries = edges.iter().map(|e| &e.geometry).collect::<Vec<_>>();
    let merged_line = merge_lines(&geometries);
    if !merged_line.is_contiguous() {
        log::warn!(
            "segments of path {} -> {} do not join into a single line ({} parts), concatenating them",
            path.src,
            path.dst,
            merged_line.n_parts
        );
    }
    let _ = attributes.insert(WKT_KEY, merged_line.geometry.wkt_string().as_str());

    let merged_from = edges
        .iter()
        .flat_map(|e| e.original_geometries())
        .collect::<Vec<_>>();
    log::debug!(
        "merged {} edges into {} -> {}",
        edges.len(),
        path.src,
        path.dst
    );
    Ok(RoadEdge {
        src: path.src,
        dst: path.dst,
        attributes,
        geometry: merged_line.geometry,
        merged_from,
    })
}

#[cfg(test)]
mod tests {
    use super::{simplify_graph, simplify_network, SimplifyOptions};
    use crate::{
        algorithm::endpoint::find_endpoints,
        model::network::{
            build_graph, AttributeBag, AttributeValue, CoordKey, LinkRecord,
            MissingGeometryPolicy, RoadGraph, Scalar, WKT_KEY,
        },
    };
    use std::collections::{BTreeSet, HashSet};

    const ACCUMULATORS: [&str; 2] = ["speed_limit", "length"];

    fn options() -> SimplifyOptions<'static> {
        SimplifyOptions {
            accumulator_keys: &ACCUMULATORS,
            max_path_length: 1000,
        }
    }

    fn c(x: f64, y: f64) -> CoordKey {
        CoordKey::new(x, y)
    }

    fn record(a: (f64, f64), b: (f64, f64), length: f64) -> LinkRecord {
        let mut attributes = AttributeBag::new();
        let _ = attributes.insert("road_type", 3_i64);
        let _ = attributes.insert("speed_limit", 50_i64);
        let _ = attributes.insert("length", length);
        LinkRecord::from_line(vec![a, b].into(), attributes)
    }

    /// A=(0,0) -> b -> c -> d -> E=(4,0), with extra branches making A and E
    /// intersections.
    fn chain_graph() -> RoadGraph {
        let records = vec![
            record((0.0, 0.0), (1.0, 0.0), 1.0),
            record((1.0, 0.0), (2.0, 0.0), 2.0),
            record((2.0, 0.0), (3.0, 0.0), 3.0),
            record((3.0, 0.0), (4.0, 0.0), 4.0),
            record((0.0, 0.0), (0.0, 1.0), 1.0),
            record((-1.0, 0.0), (0.0, 0.0), 1.0),
            record((4.0, 0.0), (4.0, 1.0), 1.0),
            record((4.0, -1.0), (4.0, 0.0), 1.0),
        ];
        build_graph(&records, MissingGeometryPolicy::Abort).unwrap()
    }

    #[test]
    fn test_chain_collapses_to_single_edge() {
        let graph = chain_graph();
        let simplified = simplify_graph(&graph, &options()).unwrap();
        assert_eq!(simplified.n_nodes(), 6);
        assert_eq!(simplified.n_edges(), 5);
        for interstitial in [c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)] {
            assert!(!simplified.contains_node(&interstitial));
        }
        let edges = simplified.get_edges(&c(0.0, 0.0), &c(4.0, 0.0)).unwrap();
        assert_eq!(edges.len(), 1);
        let edge = &edges[0];
        assert_eq!(edge.geometry.0.len(), 5);
        assert_eq!(edge.merged_from.len(), 4);
        assert_eq!(
            edge.attributes.get("length"),
            Some(&AttributeValue::List(vec![
                Scalar::Float(1.0),
                Scalar::Float(2.0),
                Scalar::Float(3.0),
                Scalar::Float(4.0)
            ]))
        );
        assert_eq!(
            edge.attributes.get("speed_limit").map(|v| v.values().len()),
            Some(4)
        );
        assert_eq!(
            edge.attributes.get("road_type"),
            Some(&AttributeValue::Scalar(Scalar::Int(3)))
        );
        let wkt = edge
            .attributes
            .get_scalar(WKT_KEY)
            .and_then(|s| s.as_str().map(String::from))
            .unwrap();
        assert!(wkt.starts_with("LINESTRING"));
    }

    #[test]
    fn test_input_graph_is_not_modified() {
        let graph = chain_graph();
        let n_nodes = graph.n_nodes();
        let n_edges = graph.n_edges();
        let _ = simplify_graph(&graph, &options()).unwrap();
        assert_eq!(graph.n_nodes(), n_nodes);
        assert_eq!(graph.n_edges(), n_edges);
    }

    #[test]
    fn test_two_way_road_keeps_both_directions() {
        let records = vec![
            record((0.0, 0.0), (1.0, 0.0), 1.0),
            record((1.0, 0.0), (0.0, 0.0), 1.0),
            record((1.0, 0.0), (2.0, 0.0), 1.0),
            record((2.0, 0.0), (1.0, 0.0), 1.0),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        let (simplified, tables) = simplify_network(&graph, &options()).unwrap();
        assert_eq!(simplified.n_nodes(), 2);
        assert_eq!(simplified.n_edges(), 2);
        assert!(simplified.get_edges(&c(0.0, 0.0), &c(2.0, 0.0)).is_ok());
        assert!(simplified.get_edges(&c(2.0, 0.0), &c(0.0, 0.0)).is_ok());
        assert_eq!(tables.nodes.len(), 2);
        assert_eq!(tables.edges.len(), 2);
    }

    #[test]
    fn test_loop_collapses_to_self_loop() {
        let records = vec![
            record((-1.0, 0.0), (0.0, 0.0), 1.0),
            record((0.0, 0.0), (1.0, 0.0), 1.0),
            record((1.0, 0.0), (1.0, 1.0), 1.0),
            record((1.0, 1.0), (0.0, 0.0), 1.0),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        let simplified = simplify_graph(&graph, &options()).unwrap();
        assert_eq!(simplified.n_nodes(), 2);
        let ring = simplified.get_edges(&c(0.0, 0.0), &c(0.0, 0.0)).unwrap();
        assert_eq!(ring.len(), 1);
        assert!(ring[0].is_self_loop());
        assert_eq!(ring[0].geometry.0.first(), ring[0].geometry.0.last());
    }

    #[test]
    fn test_same_endpoint_pair_keeps_last_path() {
        // two chains from (0,0) to (2,0). successors are walked in ascending
        // order, so the upper chain is merged last.
        let named = |a: (f64, f64), b: (f64, f64), name: &str| {
            let mut r = record(a, b, 1.0);
            let _ = r.attributes.insert("name", name);
            r
        };
        let records = vec![
            named((0.0, 0.0), (1.0, -1.0), "lower"),
            named((1.0, -1.0), (2.0, 0.0), "lower"),
            named((0.0, 0.0), (1.0, 1.0), "upper"),
            named((1.0, 1.0), (2.0, 0.0), "upper"),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        let simplified = simplify_graph(&graph, &options()).unwrap();
        assert_eq!(simplified.n_nodes(), 2);
        assert!(!simplified.contains_node(&c(1.0, -1.0)));
        assert!(!simplified.contains_node(&c(1.0, 1.0)));
        let edges = simplified.get_edges(&c(0.0, 0.0), &c(2.0, 0.0)).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(
            edges[0].attributes.get_scalar("name").and_then(Scalar::as_str),
            Some("upper")
        );
        assert_eq!(CoordKey::from(&edges[0].geometry.0[1]), c(1.0, 1.0));
    }

    #[test]
    fn test_capped_path_is_left_unsimplified() {
        let graph = chain_graph();
        let capped = SimplifyOptions {
            max_path_length: 2,
            ..options()
        };
        let simplified = simplify_graph(&graph, &capped).unwrap();
        assert_eq!(simplified.n_nodes(), graph.n_nodes());
        assert_eq!(simplified.n_edges(), graph.n_edges());
        for node in [c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)] {
            assert!(simplified.contains_node(&node));
        }
        for (u, v) in [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)] {
            assert_eq!(simplified.get_edges(&c(u, 0.0), &c(v, 0.0)).unwrap().len(), 1);
        }
        assert!(simplified.get_edges(&c(0.0, 0.0), &c(4.0, 0.0)).is_err());
    }

    /// endpoints reachable from `src` by walking only through interstitial nodes.
    fn reachable_endpoints(
        graph: &RoadGraph,
        src: &CoordKey,
        endpoints: &BTreeSet<CoordKey>,
    ) -> BTreeSet<CoordKey> {
        let mut found = BTreeSet::new();
        let mut visited: HashSet<CoordKey> = HashSet::new();
        let mut stack: Vec<CoordKey> = graph.successors(src).unwrap().iter().copied().collect();
        while let Some(node) = stack.pop() {
            if endpoints.contains(&node) {
                found.insert(node);
                continue;
            }
            if !visited.insert(node) {
                continue;
            }
            stack.extend(graph.successors(&node).unwrap().iter().copied());
        }
        found
    }

    #[test]
    fn test_reachability_between_endpoints_is_preserved() {
        // a small grid of two-way streets with shape points on some edges
        let mut records = vec![];
        let mut two_way = |a: (f64, f64), b: (f64, f64)| {
            records.push(record(a, b, 1.0));
            records.push(record(b, a, 1.0));
        };
        two_way((0.0, 0.0), (0.5, 0.0));
        two_way((0.5, 0.0), (1.0, 0.0));
        two_way((1.0, 0.0), (1.0, 0.5));
        two_way((1.0, 0.5), (1.0, 1.0));
        two_way((0.0, 0.0), (0.0, 1.0));
        two_way((0.0, 1.0), (1.0, 1.0));
        two_way((1.0, 0.0), (2.0, 0.0));
        two_way((1.0, 1.0), (1.0, 2.0));
        records.push(record((2.0, 0.0), (2.5, 0.5), 1.0));
        records.push(record((2.5, 0.5), (3.0, 0.0), 1.0));
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        let endpoints = find_endpoints(&graph).unwrap();
        let simplified = simplify_graph(&graph, &options()).unwrap();

        for src in endpoints.iter() {
            let before = reachable_endpoints(&graph, src, &endpoints);
            let after: BTreeSet<CoordKey> =
                simplified.successors(src).unwrap().iter().copied().collect();
            assert_eq!(before, after, "endpoint {src}");
        }
    }
}
