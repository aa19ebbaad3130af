pub mod restaurant;

pub use restaurant::Restaurant;
