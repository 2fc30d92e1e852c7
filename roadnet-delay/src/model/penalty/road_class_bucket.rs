use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// groups of functional road classes that share a penalty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClassBucket {
    /// classes 1 and 2, highways and main roads
    Rt12,
    /// class 3, regional collectors
    Rt3,
    /// classes 4 to 6, local streets
    Rt456,
}

impl RoadClassBucket {
    /// bucket for a functional road class. classes outside 1..6 have none
    /// and are driven through without penalty.
    pub fn from_road_class(road_class: i64) -> Option<RoadClassBucket> {
        match road_class {
            1 | 2 => Some(RoadClassBucket::Rt12),
            3 => Some(RoadClassBucket::Rt3),
            4..=6 => Some(RoadClassBucket::Rt456),
            _ => None,
        }
    }
}

impl Display for RoadClassBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoadClassBucket::Rt12 => write!(f, "rt12"),
            RoadClassBucket::Rt3 => write!(f, "rt3"),
            RoadClassBucket::Rt456 => write!(f, "rt456"),
        }
    }
}
