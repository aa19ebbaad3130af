pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::RestaurantService;
pub use domain::{
    cuisine_from_code, Address, Cuisine, RatedRestaurant, RemovalOutcome, Restaurant,
    RestaurantRepository, Review,
};
pub use infrastructure::{InMemoryRestaurantRepository, MongoRestaurantRepository};
