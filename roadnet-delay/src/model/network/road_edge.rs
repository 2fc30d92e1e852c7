use geo::LineString;

use super::{AttributeBag, CoordKey};

/// a directed edge of the road network multigraph.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    pub src: CoordKey,
    pub dst: CoordKey,
    pub attributes: AttributeBag,
    pub geometry: LineString<f64>,
    /// geometries of the original link records this edge was collapsed from.
    /// empty for edges built directly from a record.
    pub merged_from: Vec<LineString<f64>>,
}

impl RoadEdge {
    pub fn new(
        src: CoordKey,
        dst: CoordKey,
        attributes: AttributeBag,
        geometry: LineString<f64>,
    ) -> RoadEdge {
        RoadEdge {
            src,
            dst,
            attributes,
            geometry,
            merged_from: vec![],
        }
    }

    /// the original geometries this edge stands for: its provenance chain if
    /// it was merged, otherwise its own geometry.
    pub fn original_geometries(&self) -> Vec<LineString<f64>> {
        if self.merged_from.is_empty() {
            vec![self.geometry.clone()]
        } else {
            self.merged_from.clone()
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}
