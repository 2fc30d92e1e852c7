mod delay_operation;
pub mod pipeline;

pub use delay_operation::DelayOperation;
