pub mod cancellation;
pub mod logger;

pub use cancellation::OperationLimits;
pub use logger::{init_logger, LogContext, TimedOperation};
