use super::{AttributeBag, CoordKey, NetworkError, RoadEdge, RoadGraph};
use geo::LineString;
use itertools::Itertools;

/// node table row derived from a road graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub x: f64,
    pub y: f64,
    pub in_degree: usize,
    pub out_degree: usize,
    /// in-degree plus out-degree
    pub connections: usize,
    pub attributes: Option<AttributeBag>,
}

/// edge table row derived from a road graph.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub src: CoordKey,
    pub dst: CoordKey,
    pub attributes: AttributeBag,
    pub geometry: LineString<f64>,
}

/// tabular view of a road graph, sorted by coordinate.
#[derive(Debug, Clone, Default)]
pub struct NetworkTables {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

impl NetworkTables {
    pub fn from_graph(graph: &RoadGraph) -> Result<NetworkTables, NetworkError> {
        let nodes = graph
            .sorted_node_data()
            .into_iter()
            .map(|node| {
                let in_degree = graph.in_degree(&node.coord)?;
                let out_degree = graph.out_degree(&node.coord)?;
                Ok(NodeRow {
                    x: node.coord.x,
                    y: node.coord.y,
                    in_degree,
                    out_degree,
                    connections: in_degree + out_degree,
                    attributes: node.attributes.clone(),
                })
            })
            .collect::<Result<Vec<_>, NetworkError>>()?;
        let edges = graph.sorted_edges().into_iter().map(EdgeRow::from).collect_vec();
        Ok(NetworkTables { nodes, edges })
    }

    /// node rows with more than one connection.
    pub fn intersections(&self) -> impl Iterator<Item = &NodeRow> {
        self.nodes.iter().filter(|n| n.connections > 1)
    }
}

impl From<&RoadEdge> for EdgeRow {
    fn from(edge: &RoadEdge) -> Self {
        EdgeRow {
            src: edge.src,
            dst: edge.dst,
            attributes: edge.attributes.clone(),
            geometry: edge.geometry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NetworkTables;
    use crate::model::network::{
        build_graph, AttributeBag, LinkRecord, MissingGeometryPolicy,
    };

    #[test]
    fn test_connections() {
        let records = vec![
            LinkRecord::from_line(vec![(0.0, 0.0), (1.0, 0.0)].into(), AttributeBag::new()),
            LinkRecord::from_line(vec![(1.0, 0.0), (2.0, 0.0)].into(), AttributeBag::new()),
            LinkRecord::from_line(vec![(1.0, 0.0), (1.0, 1.0)].into(), AttributeBag::new()),
        ];
        let graph = build_graph(&records, MissingGeometryPolicy::Abort).unwrap();
        let tables = NetworkTables::from_graph(&graph).unwrap();
        assert_eq!(tables.nodes.len(), 4);
        assert_eq!(tables.edges.len(), 3);
        let hub = tables
            .nodes
            .iter()
            .find(|n| n.x == 1.0 && n.y == 0.0)
            .unwrap();
        assert_eq!((hub.in_degree, hub.out_degree, hub.connections), (1, 2, 3));
        assert_eq!(tables.intersections().count(), 1);
    }
}
