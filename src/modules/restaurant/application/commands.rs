use serde::Deserialize;

use crate::modules::restaurant::domain::{cuisine_from_code, Address, Restaurant, Review};
use crate::shared::errors::AppResult;

/// Payload for creating a restaurant, as handed over by the routing layer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurantCommand {
    pub name: String,
    pub cuisine: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl NewRestaurantCommand {
    /// Resolve the cuisine code before anything else is built
    pub fn into_restaurant(self) -> AppResult<Restaurant> {
        let cuisine = cuisine_from_code(self.cuisine)?;
        let address = Address::new(
            self.street,
            self.number,
            self.city,
            self.state,
            self.postal_code,
        );
        Ok(Restaurant::new(self.name, cuisine, address))
    }
}

/// Full replacement of an existing restaurant
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceRestaurantCommand {
    pub id: String,
    #[serde(flatten)]
    pub restaurant: NewRestaurantCommand,
}

impl ReplaceRestaurantCommand {
    pub fn into_restaurant(self) -> AppResult<Restaurant> {
        Ok(self.restaurant.into_restaurant()?.with_id(self.id))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCommand {
    pub stars: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<ReviewCommand> for Review {
    fn from(command: ReviewCommand) -> Self {
        Review::new(command.stars, command.comment)
    }
}
