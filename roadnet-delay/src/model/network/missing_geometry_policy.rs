use serde::{Deserialize, Serialize};

/// what the graph builder does with a link record that has no geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingGeometryPolicy {
    /// fail the whole build on the first record without a geometry
    #[default]
    Abort,
    /// log the record and continue building without it
    Skip,
}
