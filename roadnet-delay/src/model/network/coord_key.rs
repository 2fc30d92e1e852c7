use geo::Coord;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::Display,
    hash::{Hash, Hasher},
};

/// a 2-D coordinate used as the identity of a road network node.
///
/// floating point values have no total ordering or hash in Rust, so equality
/// and hashing are defined over the bit patterns of the two components and
/// ordering over [`f64::total_cmp`] (x first, then y). negative zero is
/// normalized to zero on construction so that both agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordKey {
    pub x: f64,
    pub y: f64,
}

impl CoordKey {
    pub fn new(x: f64, y: f64) -> CoordKey {
        CoordKey {
            x: normalize_zero(x),
            y: normalize_zero(y),
        }
    }

    fn bits(&self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl From<Coord<f64>> for CoordKey {
    fn from(value: Coord<f64>) -> Self {
        CoordKey::new(value.x, value.y)
    }
}

impl From<&Coord<f64>> for CoordKey {
    fn from(value: &Coord<f64>) -> Self {
        CoordKey::new(value.x, value.y)
    }
}

impl From<(f64, f64)> for CoordKey {
    fn from(value: (f64, f64)) -> Self {
        CoordKey::new(value.0, value.1)
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for CoordKey {}

impl Hash for CoordKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Display for CoordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
