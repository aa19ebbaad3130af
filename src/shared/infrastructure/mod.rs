//! Shared infrastructure concerns
//!
//! Connection settings and the store handle shared by every module.

pub mod config;
pub mod database;

pub use config::DatabaseConfig;
pub use database::Database;
