pub mod restaurant_repository;

pub use restaurant_repository::{
    RatedRestaurant, RemovalOutcome, RestaurantRepository, TOP_RATED_LIMIT,
};
