mod link_reader;
mod network_writer;

pub use link_reader::{
    join_known_speed_limits, read_known_speed_limits, read_link_records, read_signals,
};
pub use network_writer::{filenames, write_links, write_network};
