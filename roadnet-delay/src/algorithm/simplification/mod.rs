mod attribute_merge;
mod line_merge;
pub mod path_ops;
mod simplified_path;
mod simplify_ops;

pub use attribute_merge::merge_attributes;
pub use line_merge::{merge_lines, MergedLine};
pub use simplified_path::SimplifiedPath;
pub use simplify_ops::{simplify_graph, simplify_network, SimplifyOptions};
