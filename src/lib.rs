pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::restaurant::{
    infrastructure::ensure_text_index, MongoRestaurantRepository, RestaurantRepository,
    RestaurantService,
};
use shared::utils::{init_logger, OperationLimits};
use shared::{AppResult, Database, DatabaseConfig};

/// Wire the restaurant service against MongoDB using the environment.
///
/// Fails at startup, not on the first request, when the store is unreachable
/// or full-text search has no index to use.
pub async fn bootstrap() -> AppResult<RestaurantService> {
    init_logger();

    let config = DatabaseConfig::from_env()?;
    bootstrap_with(&config).await
}

pub async fn bootstrap_with(config: &DatabaseConfig) -> AppResult<RestaurantService> {
    let database = Database::connect(config).await?;
    ensure_text_index(&database, config.ensure_indexes).await?;

    let restaurant_repo: Arc<dyn RestaurantRepository> =
        Arc::new(MongoRestaurantRepository::new(&database));

    log_info!("Restaurant service initialized");
    Ok(RestaurantService::new(restaurant_repo)
        .with_limits(OperationLimits::new().with_timeout(config.operation_timeout)))
}
