use super::{network::NetworkError, penalty::PenaltyError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DelayCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure building road network: {source}")]
    NetworkError {
        #[from]
        source: NetworkError,
    },
    #[error("failure assigning intersection penalties: {source}")]
    PenaltyError {
        #[from]
        source: PenaltyError,
    },
    #[error("failure reading or writing files: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
