use crate::model::network::CoordKey;
use geo::Point;
use rstar::RTree;

/// spatial index over traffic signal locations.
pub struct SignalIndex {
    tree: RTree<[f64; 2]>,
    buffer_meters: f64,
}

impl SignalIndex {
    pub fn new(signals: &[Point<f64>], buffer_meters: f64) -> SignalIndex {
        let points = signals.iter().map(|p| [p.x(), p.y()]).collect::<Vec<_>>();
        SignalIndex {
            tree: RTree::bulk_load(points),
            buffer_meters,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// true if some signal lies within the buffer distance of the coordinate.
    pub fn is_signalized(&self, coord: &CoordKey) -> bool {
        // rstar takes the squared radius
        let max_squared_radius = self.buffer_meters * self.buffer_meters;
        self.tree
            .locate_within_distance([coord.x, coord.y], max_squared_radius)
            .next()
            .is_some()
    }
}
