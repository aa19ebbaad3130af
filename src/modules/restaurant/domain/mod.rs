pub mod entities;
pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use entities::Restaurant;
pub use repositories::{RatedRestaurant, RemovalOutcome, RestaurantRepository};
pub use value_objects::{cuisine_from_code, Address, Cuisine, Review};
