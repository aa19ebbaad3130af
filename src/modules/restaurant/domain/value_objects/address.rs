use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    ExactLength, NotEmpty, Validate, ValidationChain, ValidationResult,
};

pub const STATE_CODE_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub city: String,
    /// Two-letter region code
    pub state: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            number: number.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    fn validation_chain() -> ValidationChain<Address> {
        ValidationChain::new()
            .add_rule(Arc::new(NotEmpty::new(street, "Street cannot be empty.")))
            .add_rule(Arc::new(NotEmpty::new(number, "Number cannot be empty.")))
            .add_rule(Arc::new(NotEmpty::new(city, "City cannot be empty.")))
            .add_rule(Arc::new(NotEmpty::new(state, "State cannot be empty.")))
            .add_rule(Arc::new(ExactLength::new(
                state,
                STATE_CODE_LENGTH,
                "State must have exactly 2 characters.",
            )))
            .add_rule(Arc::new(NotEmpty::new(postal_code, "Postal code cannot be empty.")))
    }
}

fn street(a: &Address) -> &str {
    &a.street
}

fn number(a: &Address) -> &str {
    &a.number
}

fn city(a: &Address) -> &str {
    &a.city
}

fn state(a: &Address) -> &str {
    &a.state
}

fn postal_code(a: &Address) -> &str {
    &a.postal_code
}

impl Validate for Address {
    fn validate(&self) -> ValidationResult {
        Self::validation_chain().validate(self)
    }
}
