/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use restaurant_directory_lib::modules::restaurant::{
    application::NewRestaurantCommand, Address, Cuisine, Restaurant, Review,
};

pub struct RestaurantFactory {
    name: String,
    cuisine: Cuisine,
    street: String,
    number: String,
    city: String,
    state: String,
    postal_code: String,
}

impl Default for RestaurantFactory {
    fn default() -> Self {
        Self {
            name: "Test Restaurant".to_string(),
            cuisine: Cuisine::Brazilian,
            street: "Rua dos Testes".to_string(),
            number: "100".to_string(),
            city: "Belo Horizonte".to_string(),
            state: "MG".to_string(),
            postal_code: "30130-000".to_string(),
        }
    }
}

impl RestaurantFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_cuisine(mut self, cuisine: Cuisine) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn with_street(mut self, street: &str) -> Self {
        self.street = street.to_string();
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = state.to_string();
        self
    }

    pub fn build(self) -> Restaurant {
        Restaurant::new(
            self.name,
            self.cuisine,
            Address::new(
                self.street,
                self.number,
                self.city,
                self.state,
                self.postal_code,
            ),
        )
    }

    pub fn command(self) -> NewRestaurantCommand {
        NewRestaurantCommand {
            name: self.name,
            cuisine: self.cuisine.code(),
            street: self.street,
            number: self.number,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
        }
    }
}

pub fn review(stars: i32) -> Review {
    Review::new(stars, Some(format!("{} stars", stars)))
}
