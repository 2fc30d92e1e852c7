use serde::{Deserialize, Serialize};

/// link element type codes that select penalty rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementTypeCodes {
    pub slip_road: i64,
    pub roundabout: i64,
}

impl Default for ElementTypeCodes {
    fn default() -> Self {
        Self {
            slip_road: 6,
            roundabout: 5,
        }
    }
}
