/// Test helper functions shared by repository and service tests
use restaurant_directory_lib::modules::restaurant::{Restaurant, RestaurantRepository};

use super::factories::{review, RestaurantFactory};

/// Insert a restaurant and look its assigned id back up by exact name
pub async fn insert_named(repo: &dyn RestaurantRepository, name: &str) -> String {
    repo.insert(&RestaurantFactory::new().with_name(name).build())
        .await
        .unwrap();

    repo.get_all()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.name() == name)
        .and_then(|r| r.id().map(str::to_string))
        .expect("inserted restaurant should be listed with an id")
}

/// Record one review per entry of `stars`
pub async fn rate_all(repo: &dyn RestaurantRepository, id: &str, stars: &[i32]) {
    for s in stars {
        repo.add_review(id, &review(*s)).await.unwrap();
    }
}

pub fn names(restaurants: &[Restaurant]) -> Vec<String> {
    let mut names: Vec<String> = restaurants.iter().map(|r| r.name().to_string()).collect();
    names.sort();
    names
}
