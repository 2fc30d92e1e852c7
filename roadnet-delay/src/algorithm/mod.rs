pub mod aggregation;
pub mod endpoint;
pub mod junction;
pub mod simplification;
pub mod speed_limit;
