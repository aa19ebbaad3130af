use std::sync::Arc;

/// Result of a validation rule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
        }
    }

    /// Merge two validation results, keeping `self`'s errors first
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.is_valid && other.is_valid;
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Something that can check itself and report every violated rule.
pub trait Validate {
    fn validate(&self) -> ValidationResult;

    fn is_valid(&self) -> bool {
        self.validate().is_valid
    }
}

/// A single declarative predicate over some field of `T`
pub trait ValidationRule<T>: Send + Sync {
    fn validate(&self, target: &T) -> ValidationResult;

    /// Get the name of this validation rule for logging
    fn rule_name(&self) -> &'static str;
}

/// Ordered list of rules evaluated against one target
pub struct ValidationChain<T> {
    rules: Vec<Arc<dyn ValidationRule<T>>>,
    stop_on_first_error: bool,
}

impl<T> ValidationChain<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            stop_on_first_error: false,
        }
    }

    /// Add a validation rule to the chain
    pub fn add_rule(mut self, rule: Arc<dyn ValidationRule<T>>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set whether to stop validation on first error
    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    /// Execute all validation rules in the chain
    pub fn validate(&self, target: &T) -> ValidationResult {
        let mut combined_result = ValidationResult::valid();

        for rule in &self.rules {
            let rule_result = rule.validate(target);

            if !rule_result.is_valid {
                log::debug!("Validation rule '{}' failed", rule.rule_name());
            }

            combined_result = combined_result.merge(rule_result);

            if self.stop_on_first_error && !combined_result.is_valid {
                break;
            }
        }

        combined_result
    }

    /// Get the number of rules in the chain
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<T> Default for ValidationChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
