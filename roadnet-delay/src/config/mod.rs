mod column_names;
mod delay_config;

pub use column_names::ColumnNames;
pub use delay_config::DelayToolConfiguration;
