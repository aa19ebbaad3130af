pub mod commands;
pub mod service;

pub use commands::{NewRestaurantCommand, ReplaceRestaurantCommand, ReviewCommand};
pub use service::RestaurantService;
