use std::env;
use std::time::Duration;

use crate::log_info;
use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_DATABASE_NAME: &str = "restaurant_directory";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub operation_timeout: Duration,
    pub ensure_indexes: bool,
}

impl DatabaseConfig {
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            operation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ensure_indexes: true,
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn with_ensure_indexes(mut self, ensure: bool) -> Self {
        self.ensure_indexes = ensure;
        self
    }

    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let uri = Self::get_validated_uri("MONGODB_URI")?;
        let database_name =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
        if database_name.trim().is_empty() {
            return Err(AppError::Configuration(
                "MONGODB_DATABASE cannot be empty".to_string(),
            ));
        }

        let timeout_secs = match env::var("MONGODB_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Configuration(format!("Invalid MONGODB_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::Configuration(
                "MONGODB_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        let ensure_indexes = match env::var("MONGODB_ENSURE_INDEXES") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Configuration(format!("Invalid MONGODB_ENSURE_INDEXES '{}'", raw))
            })?,
            Err(_) => true,
        };

        Ok(Self::new(uri, database_name)
            .with_operation_timeout(Duration::from_secs(timeout_secs))
            .with_ensure_indexes(ensure_indexes))
    }

    /// Validate and retrieve the connection string without logging credentials
    fn get_validated_uri(var: &str) -> AppResult<String> {
        let uri = env::var(var).map_err(|_| {
            AppError::Configuration(format!("{} environment variable not found", var))
        })?;

        validate_uri(&uri)?;

        log_info!(
            "Using MongoDB at: {}",
            uri.rsplit('@').next().unwrap_or("unknown_host")
        );

        Ok(uri)
    }
}

pub fn validate_uri(uri: &str) -> AppResult<()> {
    if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
        return Err(AppError::Configuration(
            "Invalid MongoDB URI format. Must start with mongodb:// or mongodb+srv://".to_string(),
        ));
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
