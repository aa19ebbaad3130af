use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::validation::{IntRange, Validate, ValidationChain, ValidationResult};

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

/// A single rating left for a restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub stars: i32,
    pub comment: Option<String>,
}

impl Review {
    pub fn new(stars: i32, comment: Option<String>) -> Self {
        Self { stars, comment }
    }

    fn validation_chain() -> ValidationChain<Review> {
        ValidationChain::new().add_rule(Arc::new(IntRange::new(
            stars,
            MIN_STARS,
            MAX_STARS,
            "Stars must be between 1 and 5.",
        )))
    }
}

fn stars(r: &Review) -> i32 {
    r.stars
}

impl Validate for Review {
    fn validate(&self) -> ValidationResult {
        Self::validation_chain().validate(self)
    }
}
