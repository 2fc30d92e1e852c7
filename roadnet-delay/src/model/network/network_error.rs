use thiserror::Error;

use super::{AdjacencyDirection, CoordKey};

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("link record {0} is missing a geometry")]
    MissingGeometry(usize),
    #[error("link record {index} has unsupported geometry type {geometry_type}, expected a line")]
    UnsupportedGeometry {
        index: usize,
        geometry_type: String,
    },
    #[error("link record {index} has a line geometry with {n_coords} coordinate(s), expected at least 2")]
    DegenerateGeometry { index: usize, n_coords: usize },
    #[error("path starting at {start} via {successor} exceeded the maximum path length of {limit} nodes")]
    PathRecursionLimitExceeded {
        start: CoordKey,
        successor: CoordKey,
        limit: usize,
    },
    #[error("attempting to get node {0} not in graph")]
    GraphMissingNode(CoordKey),
    #[error("attempting to get {1} adjacencies for node {0} not in graph")]
    AdjacencyMissingNode(CoordKey, AdjacencyDirection),
    #[error("no edge exists from {0} to {1}")]
    GraphMissingEdge(CoordKey, CoordKey),
    #[error("attempting to insert node {0} already present in graph")]
    DuplicateNode(CoordKey),
    #[error("failure simplifying graph: {0}")]
    GraphSimplificationError(String),
    #[error("invalid attribute '{key}': {message}")]
    InvalidAttribute { key: String, message: String },
    #[error("file {file} does not contain column '{column}'")]
    MissingColumn { file: String, column: String },
    #[error("failure reading file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("unable to deserialize WKT into geometry: {0}")]
    InvalidWkt(String),
    #[error("{0}")]
    InternalError(String),
}
