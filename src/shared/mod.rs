// Shared kernel used by every bounded context

pub mod errors; // Shared error types
pub mod infrastructure; // Configuration and the store handle
pub mod utils; // Logging and cancellation helpers
pub mod validation; // Rule-based validation engine

// Re-exports for convenience
pub use errors::{AppError, AppResult, ErrorKind};
pub use infrastructure::{Database, DatabaseConfig};
