mod junction_ops;
mod signal_index;

pub use junction_ops::{assign_junction_flags, signalized_intersections};
pub use signal_index::SignalIndex;
