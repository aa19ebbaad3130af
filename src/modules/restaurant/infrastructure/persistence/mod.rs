pub mod in_memory_restaurant_repository;
pub mod mongo_restaurant_repository;

pub use in_memory_restaurant_repository::InMemoryRestaurantRepository;
pub use mongo_restaurant_repository::MongoRestaurantRepository;
