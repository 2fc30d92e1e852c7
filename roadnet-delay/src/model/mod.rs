mod delay_cli_error;
pub mod network;
pub mod penalty;

pub use delay_cli_error::DelayCliError;
