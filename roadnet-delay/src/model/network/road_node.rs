use super::{AttributeBag, CoordKey};

/// a node of the road network. the coordinate is its identity; the
/// attributes are a snapshot of the first link record that touched it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    pub coord: CoordKey,
    pub attributes: Option<AttributeBag>,
}

impl RoadNode {
    pub fn new(coord: CoordKey, attributes: Option<AttributeBag>) -> RoadNode {
        RoadNode { coord, attributes }
    }
}
