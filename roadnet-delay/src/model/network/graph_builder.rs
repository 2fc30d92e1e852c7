use super::{
    CoordKey, LinkRecord, MissingGeometryPolicy, NetworkError, RoadEdge, RoadGraph, RoadNode,
};
use kdam::tqdm;
use wkt::ToWkt;

/// attribute key holding the raw geometry text of an edge.
pub const WKT_KEY: &str = "wkt";

/// builds a directed multigraph from line-geometry link records. each record
/// becomes one edge from its first to its last coordinate. nodes are created
/// on first sight and keep the attributes of the record that created them.
///
/// records without a geometry fail the build under [`MissingGeometryPolicy::Abort`]
/// and are logged and dropped under [`MissingGeometryPolicy::Skip`]. geometries
/// that are not lines always fail.
pub fn build_graph(
    records: &[LinkRecord],
    policy: MissingGeometryPolicy,
) -> Result<RoadGraph, NetworkError> {
    let mut graph = RoadGraph::empty();
    let mut skipped: usize = 0;
    let iter = tqdm!(
        records.iter().enumerate(),
        desc = "build road graph",
        total = records.len()
    );
    for (index, record) in iter {
        let line = match record.line_geometry(index) {
            Ok(line) => line,
            Err(NetworkError::MissingGeometry(_)) if policy == MissingGeometryPolicy::Skip => {
                log::warn!("link record {index} has no geometry, skipping");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        let (first, last) = match (line.0.first(), line.0.last()) {
            (Some(f), Some(l)) => (CoordKey::from(f), CoordKey::from(l)),
            _ => {
                return Err(NetworkError::InternalError(format!(
                    "validated line for record {index} has no coordinates"
                )))
            }
        };
        for coord in [first, last] {
            if !graph.contains_node(&coord) {
                let node = RoadNode::new(coord, Some(record.attributes.clone()));
                graph.insert_node(node)?;
            }
        }
        let mut attributes = record.attributes.clone();
        let _ = attributes.insert(WKT_KEY, line.wkt_string().as_str());
        graph.add_edge(RoadEdge::new(first, last, attributes, line))?;
    }
    if skipped > 0 {
        log::warn!("{skipped} link record(s) without geometry were skipped");
    }
    log::info!(
        "built road graph with {} nodes and {} edges",
        graph.n_nodes(),
        graph.n_edges()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::{build_graph, WKT_KEY};
    use crate::model::network::{
        AttributeBag, CoordKey, LinkRecord, MissingGeometryPolicy, NetworkError,
    };
    use geo::{line_string, Geometry, Line};

    fn record(name: &str, coords: &[(f64, f64)]) -> LinkRecord {
        let mut attributes = AttributeBag::new();
        let _ = attributes.insert("name", name);
        LinkRecord::from_line(coords.to_vec().into(), attributes)
    }

    #[test]
    fn test_edges_run_first_to_last_coordinate() {
        let records = vec![
            record("a", &[(0.0, 0.0), (0.5, 0.2), (1.0, 0.0)]),
            record("b", &[(1.0, 0.0), (0.0, 0.0)]),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        assert_eq!(graph.n_nodes(), 2, "shape points are not nodes");
        assert_eq!(graph.n_edges(), 2);
        let src = CoordKey::new(0.0, 0.0);
        let dst = CoordKey::new(1.0, 0.0);
        let edges = graph.get_edges(&src, &dst).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].geometry.0.len(), 3);
        assert!(edges[0].attributes.contains_key(WKT_KEY));
        assert_eq!(graph.get_edges(&dst, &src).unwrap().len(), 1);
    }

    #[test]
    fn test_first_record_attributes_stay_on_node() {
        let records = vec![
            record("first", &[(0.0, 0.0), (1.0, 0.0)]),
            record("second", &[(0.0, 0.0), (0.0, 1.0)]),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        let node = graph.get_node(&CoordKey::new(0.0, 0.0)).unwrap();
        let name = node
            .attributes
            .as_ref()
            .and_then(|a| a.get_scalar("name"))
            .and_then(|s| s.as_str().map(String::from));
        assert_eq!(name, Some(String::from("first")));
    }

    #[test]
    fn test_missing_geometry_policy() {
        let records = vec![
            record("a", &[(0.0, 0.0), (1.0, 0.0)]),
            LinkRecord::new(None, AttributeBag::new()),
        ];
        assert!(matches!(
            build_graph(&records, MissingGeometryPolicy::Abort),
            Err(NetworkError::MissingGeometry(1))
        ));
        let graph = build_graph(&records, MissingGeometryPolicy::Skip).unwrap();
        assert_eq!(graph.n_edges(), 1);
    }

    #[test]
    fn test_line_geometry_accepted() {
        let line = Line::new((0.0, 0.0), (3.0, 4.0));
        let records = vec![LinkRecord::new(
            Some(Geometry::Line(line)),
            AttributeBag::new(),
        )];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        assert_eq!(graph.n_edges(), 1);
    }

    #[test]
    fn test_parallel_records_are_distinct_edges() {
        let records = vec![
            LinkRecord::from_line(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)], AttributeBag::new()),
            LinkRecord::from_line(
                line_string![(x: 0.0, y: 0.0), (x: 0.5, y: 0.5), (x: 1.0, y: 0.0)],
                AttributeBag::new(),
            ),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        assert_eq!(graph.n_edges(), 2);
    }
}
