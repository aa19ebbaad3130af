pub mod address;
pub mod cuisine;
pub mod review;

pub use address::Address;
pub use cuisine::{cuisine_from_code, Cuisine};
pub use review::Review;
