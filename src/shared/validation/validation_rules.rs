use super::validation_chain::{ValidationResult, ValidationRule};

/// Borrow a string field out of the validated value
pub type StrField<T> = fn(&T) -> &str;

/// Read an integer field out of the validated value
pub type IntField<T> = fn(&T) -> i32;

/// Fails when the field is empty or only whitespace
pub struct NotEmpty<T> {
    field: StrField<T>,
    message: &'static str,
}

impl<T> NotEmpty<T> {
    pub fn new(field: StrField<T>, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl<T> ValidationRule<T> for NotEmpty<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        if (self.field)(target).trim().is_empty() {
            return ValidationResult::invalid(self.message);
        }
        ValidationResult::valid()
    }

    fn rule_name(&self) -> &'static str {
        "NotEmpty"
    }
}

/// Fails when the field has more than `max` characters
pub struct MaxLength<T> {
    field: StrField<T>,
    max: usize,
    message: &'static str,
}

impl<T> MaxLength<T> {
    pub fn new(field: StrField<T>, max: usize, message: &'static str) -> Self {
        Self {
            field,
            max,
            message,
        }
    }
}

impl<T> ValidationRule<T> for MaxLength<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        if (self.field)(target).chars().count() > self.max {
            return ValidationResult::invalid(self.message);
        }
        ValidationResult::valid()
    }

    fn rule_name(&self) -> &'static str {
        "MaxLength"
    }
}

/// Fails when a non-empty field does not have exactly `length` characters.
/// Emptiness is left to `NotEmpty` so a blank code reports a single error.
pub struct ExactLength<T> {
    field: StrField<T>,
    length: usize,
    message: &'static str,
}

impl<T> ExactLength<T> {
    pub fn new(field: StrField<T>, length: usize, message: &'static str) -> Self {
        Self {
            field,
            length,
            message,
        }
    }
}

impl<T> ValidationRule<T> for ExactLength<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        let value = (self.field)(target).trim();
        if !value.is_empty() && value.chars().count() != self.length {
            return ValidationResult::invalid(self.message);
        }
        ValidationResult::valid()
    }

    fn rule_name(&self) -> &'static str {
        "ExactLength"
    }
}

/// Fails when the field lies outside `min..=max`
pub struct IntRange<T> {
    field: IntField<T>,
    min: i32,
    max: i32,
    message: &'static str,
}

impl<T> IntRange<T> {
    pub fn new(field: IntField<T>, min: i32, max: i32, message: &'static str) -> Self {
        Self {
            field,
            min,
            max,
            message,
        }
    }
}

impl<T> ValidationRule<T> for IntRange<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        if !(self.min..=self.max).contains(&(self.field)(target)) {
            return ValidationResult::invalid(self.message);
        }
        ValidationResult::valid()
    }

    fn rule_name(&self) -> &'static str {
        "IntRange"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &String) -> &str {
        s
    }

    fn number(n: &i32) -> i32 {
        *n
    }

    #[test]
    fn test_not_empty_rejects_whitespace() {
        let rule = NotEmpty::new(text, "empty");
        assert!(!rule.validate(&"   ".to_string()).is_valid);
        assert!(rule.validate(&"x".to_string()).is_valid);
    }

    #[test]
    fn test_max_length_counts_characters() {
        let rule = MaxLength::new(text, 3, "too long");
        assert!(rule.validate(&"ção".to_string()).is_valid);
        assert!(!rule.validate(&"abcd".to_string()).is_valid);
    }

    #[test]
    fn test_exact_length_ignores_empty() {
        let rule = ExactLength::new(text, 2, "two chars");
        assert!(rule.validate(&String::new()).is_valid);
        assert!(rule.validate(&"SP".to_string()).is_valid);
        assert_eq!(
            rule.validate(&"SPO".to_string()).errors,
            vec!["two chars".to_string()]
        );
    }

    #[test]
    fn test_int_range_bounds_inclusive() {
        let rule = IntRange::new(number, 1, 5, "out of range");
        assert!(rule.validate(&1).is_valid);
        assert!(rule.validate(&5).is_valid);
        assert!(!rule.validate(&0).is_valid);
        assert!(!rule.validate(&6).is_valid);
    }
}
