pub mod indexes;
pub mod mapper;
pub mod models;
pub mod persistence;

pub use indexes::ensure_text_index;
pub use persistence::{InMemoryRestaurantRepository, MongoRestaurantRepository};
