use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use super::config::{validate_uri, DatabaseConfig};
use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// Process-wide handle to the document store.
///
/// The `Client` behind `db` is internally pooled and cheap to clone; one
/// instance is created at startup and shared by every repository.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::Database,
    operation_timeout: Duration,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        validate_uri(&config.uri)?;

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            AppError::Configuration(format!("Failed to parse MongoDB URI: {}", e))
        })?;
        options.app_name = Some("restaurant-directory".to_string());
        options.connect_timeout = Some(config.operation_timeout);
        options.server_selection_timeout = Some(config.operation_timeout);

        let client = Client::with_options(options).map_err(|e| {
            AppError::DatabaseError(format!("Failed to create MongoDB client: {}", e))
        })?;
        let db = client.database(&config.database_name);

        let database = Self {
            db,
            operation_timeout: config.operation_timeout,
        };
        database.ping().await?;

        log_info!(
            "Connected to MongoDB database '{}' (timeout {}s)",
            config.database_name,
            config.operation_timeout.as_secs()
        );

        Ok(database)
    }

    /// Round-trip to the server; fails fast when it is unreachable
    pub async fn ping(&self) -> AppResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| {
                LogContext::error_with_context(&e, "MongoDB ping failed");
                AppError::DatabaseError(format!("Could not connect to MongoDB: {}", e))
            })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }

    pub fn database(&self) -> &mongodb::Database {
        &self.db
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }
}
