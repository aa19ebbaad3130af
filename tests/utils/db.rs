/// MongoDB test utilities
///
/// Tests that use these helpers are `#[ignore]`d and need `TEST_MONGODB_URI`.
/// Each test gets its own database, dropped on creation, so tests can run in
/// parallel without sharing documents.
use restaurant_directory_lib::modules::restaurant::infrastructure::ensure_text_index;
use restaurant_directory_lib::modules::restaurant::MongoRestaurantRepository;
use restaurant_directory_lib::shared::{Database, DatabaseConfig};
use std::time::Duration;

pub async fn connect_test_db(test_name: &str) -> Database {
    dotenvy::dotenv().ok();
    let uri = std::env::var("TEST_MONGODB_URI")
        .expect("TEST_MONGODB_URI must be set in .env for MongoDB tests");

    let config = DatabaseConfig::new(uri, format!("restaurant_directory_test_{}", test_name))
        .with_operation_timeout(Duration::from_secs(5));

    let db = Database::connect(&config)
        .await
        .expect("Failed to connect to test MongoDB");
    db.database()
        .drop()
        .await
        .expect("Failed to drop test database");
    ensure_text_index(&db, true)
        .await
        .expect("Failed to create text index");
    db
}

pub async fn test_repository(test_name: &str) -> MongoRestaurantRepository {
    let db = connect_test_db(test_name).await;
    MongoRestaurantRepository::new(&db)
}
