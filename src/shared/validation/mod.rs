pub mod validation_chain;
pub mod validation_rules;

pub use validation_chain::{Validate, ValidationChain, ValidationResult, ValidationRule};
pub use validation_rules::{ExactLength, IntRange, MaxLength, NotEmpty};
