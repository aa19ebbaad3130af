use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Food style of a restaurant, carried on the wire and in storage as its code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Cuisine {
    Brazilian,
    Italian,
    Arabic,
    Japanese,
    FastFood,
}

impl Cuisine {
    pub const ALL: [Cuisine; 5] = [
        Cuisine::Brazilian,
        Cuisine::Italian,
        Cuisine::Arabic,
        Cuisine::Japanese,
        Cuisine::FastFood,
    ];

    pub fn code(&self) -> i32 {
        match self {
            Cuisine::Brazilian => 1,
            Cuisine::Italian => 2,
            Cuisine::Arabic => 3,
            Cuisine::Japanese => 4,
            Cuisine::FastFood => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Brazilian => "brazilian",
            Cuisine::Italian => "italian",
            Cuisine::Arabic => "arabic",
            Cuisine::Japanese => "japanese",
            Cuisine::FastFood => "fast_food",
        }
    }
}

/// Map an integer code onto a cuisine, rejecting codes with no category
pub fn cuisine_from_code(code: i32) -> AppResult<Cuisine> {
    Cuisine::ALL
        .into_iter()
        .find(|cuisine| cuisine.code() == code)
        .ok_or(AppError::UnknownCuisineCode(code))
}

impl TryFrom<i32> for Cuisine {
    type Error = AppError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        cuisine_from_code(code)
    }
}

impl From<Cuisine> for i32 {
    fn from(cuisine: Cuisine) -> Self {
        cuisine.code()
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
