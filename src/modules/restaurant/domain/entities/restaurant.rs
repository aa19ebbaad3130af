use std::sync::Arc;

use serde::Serialize;

use crate::modules::restaurant::domain::value_objects::{Address, Cuisine, Review};
use crate::shared::validation::{MaxLength, NotEmpty, Validate, ValidationChain, ValidationResult};

pub const MAX_NAME_LENGTH: usize = 30;

/// Restaurant aggregate.
///
/// The address is required up front, so there is no partially built state to
/// validate. Reviews are attached once, when the gateway reconstitutes a
/// restaurant together with its ratings, and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    id: Option<String>,
    name: String,
    cuisine: Cuisine,
    address: Address,
    reviews: Vec<Review>,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, cuisine: Cuisine, address: Address) -> Self {
        Self {
            id: None,
            name: name.into(),
            cuisine,
            address,
            reviews: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cuisine(&self) -> Cuisine {
        self.cuisine
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Mean stars over the attached reviews, `None` when there are none
    pub fn average_stars(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: i64 = self.reviews.iter().map(|r| i64::from(r.stars)).sum();
        Some(total as f64 / self.reviews.len() as f64)
    }

    fn validation_chain() -> ValidationChain<Restaurant> {
        ValidationChain::new()
            .add_rule(Arc::new(NotEmpty::new(name, "Name cannot be empty.")))
            .add_rule(Arc::new(MaxLength::new(
                name,
                MAX_NAME_LENGTH,
                "Name can have at most 30 characters.",
            )))
    }
}

fn name(r: &Restaurant) -> &str {
    &r.name
}

impl Validate for Restaurant {
    /// Own rules first, then the address; address errors are appended.
    fn validate(&self) -> ValidationResult {
        Self::validation_chain()
            .validate(self)
            .merge(self.address.validate())
    }
}
