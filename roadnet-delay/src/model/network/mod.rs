mod adjacency_direction;
mod attribute_bag;
mod attribute_value;
mod coord_key;
mod graph_builder;
mod link_record;
mod missing_geometry_policy;
mod network_error;
mod network_tables;
mod road_edge;
mod road_graph;
mod road_node;

pub use adjacency_direction::AdjacencyDirection;
pub use attribute_bag::AttributeBag;
pub use attribute_value::{AttributeValue, Scalar};
pub use coord_key::CoordKey;
pub use graph_builder::{build_graph, WKT_KEY};
pub use link_record::{geometry_type_name, LinkRecord};
pub use missing_geometry_policy::MissingGeometryPolicy;
pub use network_error::NetworkError;
pub use network_tables::{EdgeRow, NetworkTables, NodeRow};
pub use road_edge::RoadEdge;
pub use road_graph::RoadGraph;
pub use road_node::RoadNode;

use std::collections::{BTreeSet, HashMap};

pub type RoadNodes = HashMap<CoordKey, RoadNode>;
pub type EdgesByOd = HashMap<(CoordKey, CoordKey), Vec<RoadEdge>>;
pub type AdjacencyList = HashMap<(CoordKey, AdjacencyDirection), BTreeSet<CoordKey>>;
pub type Path = Vec<CoordKey>;
