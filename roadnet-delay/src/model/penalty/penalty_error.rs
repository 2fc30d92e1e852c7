use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PenaltyError {
    #[error("no penalty rule matches row: {0}")]
    PenaltyRuleUnmatched(String),
    #[error("invalid attribute '{key}': {message}")]
    InvalidAttribute { key: String, message: String },
    #[error("invalid penalty table: {0}")]
    InvalidPenaltyTable(String),
    #[error("{0}")]
    InternalError(String),
}
