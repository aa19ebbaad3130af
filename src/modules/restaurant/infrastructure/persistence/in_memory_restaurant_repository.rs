use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::log_debug;
use crate::modules::restaurant::domain::{
    entities::Restaurant,
    repositories::{RatedRestaurant, RemovalOutcome, RestaurantRepository, TOP_RATED_LIMIT},
    value_objects::{Cuisine, Review},
};
use crate::modules::restaurant::infrastructure::mapper::{
    document_to_entity, document_to_review, entity_to_document, parse_object_id,
    review_to_document,
};
use crate::modules::restaurant::infrastructure::models::{RestaurantDocument, ReviewDocument};
use crate::shared::errors::{AppError, AppResult};

/// Process-local adapter that stores the same document shapes as MongoDB.
///
/// Insertion order stands in for the store's natural order. Full-text search
/// ranks by the number of query terms found among the name's words, without
/// stemming or stop words.
#[derive(Default)]
pub struct InMemoryRestaurantRepository {
    restaurants: RwLock<Vec<RestaurantDocument>>,
    reviews: RwLock<Vec<ReviewDocument>>,
    fail_review_deletes: AtomicBool,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the review phase of `remove` fail, to observe a partial removal
    pub fn fail_review_deletes(&self, fail: bool) {
        self.fail_review_deletes.store(fail, Ordering::SeqCst);
    }

    /// Insert and hand back the assigned id
    pub async fn insert_returning_id(&self, restaurant: &Restaurant) -> String {
        let id = ObjectId::new();
        self.restaurants
            .write()
            .await
            .push(entity_to_document(restaurant, Some(id)));
        id.to_hex()
    }

    pub async fn review_count(&self) -> usize {
        self.reviews.read().await.len()
    }

    async fn find_document(&self, id: &ObjectId) -> Option<RestaurantDocument> {
        self.restaurants
            .read()
            .await
            .iter()
            .find(|d| d.id.as_ref() == Some(id))
            .cloned()
    }

    async fn find_reviews(&self, restaurant_id: &ObjectId) -> Vec<Review> {
        let key = restaurant_id.to_hex();
        self.reviews
            .read()
            .await
            .iter()
            .filter(|r| r.restaurant_id == key)
            .cloned()
            .map(document_to_review)
            .collect()
    }

    /// Mean stars per restaurant id, best first; ties ordered by id
    async fn rating_groups(&self) -> Vec<(String, f64)> {
        let mut totals: HashMap<String, (i64, u32)> = HashMap::new();
        for review in self.reviews.read().await.iter() {
            let entry = totals.entry(review.restaurant_id.clone()).or_insert((0, 0));
            entry.0 += i64::from(review.stars);
            entry.1 += 1;
        }

        let mut groups: Vec<(String, f64)> = totals
            .into_iter()
            .map(|(id, (sum, count))| (id, sum as f64 / f64::from(count)))
            .collect();
        groups.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        groups
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<()> {
        let id = self.insert_returning_id(restaurant).await;
        log_debug!("Inserted restaurant with id {}", id);
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .read()
            .await
            .iter()
            .cloned()
            .map(document_to_entity)
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        let id = parse_object_id(id)?;
        Ok(self.find_document(&id).await.map(document_to_entity))
    }

    async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool> {
        let id = restaurant.id().ok_or_else(|| {
            AppError::InvalidInput("Cannot replace a restaurant without an id".to_string())
        })?;
        let id = parse_object_id(id)?;
        let replacement = entity_to_document(restaurant, Some(id));

        let mut restaurants = self.restaurants.write().await;
        match restaurants.iter_mut().find(|d| d.id == Some(id)) {
            Some(current) if *current != replacement => {
                *current = replacement;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool> {
        let id = parse_object_id(id)?;

        let mut restaurants = self.restaurants.write().await;
        match restaurants.iter_mut().find(|d| d.id == Some(id)) {
            Some(current) if current.cuisine != cuisine => {
                current.cuisine = cuisine;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .restaurants
            .read()
            .await
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .cloned()
            .map(document_to_entity)
            .collect())
    }

    async fn search_by_text(&self, query: &str) -> AppResult<Vec<Restaurant>> {
        let terms = words(query);

        let mut scored: Vec<(usize, RestaurantDocument)> = self
            .restaurants
            .read()
            .await
            .iter()
            .filter_map(|d| {
                let name_words = words(&d.name);
                let score = terms.iter().filter(|t| name_words.contains(t)).count();
                (score > 0).then(|| (score, d.clone()))
            })
            .collect();
        // Stable: equal scores keep insertion order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .map(|(_, d)| document_to_entity(d))
            .collect())
    }

    async fn add_review(&self, restaurant_id: &str, review: &Review) -> AppResult<()> {
        let id = parse_object_id(restaurant_id)?;
        let mut document = review_to_document(&id, review);
        document.id = Some(ObjectId::new());
        self.reviews.write().await.push(document);
        Ok(())
    }

    async fn reviews_for(&self, restaurant_id: &str) -> AppResult<Vec<Review>> {
        let id = parse_object_id(restaurant_id)?;
        Ok(self.find_reviews(&id).await)
    }

    async fn top3_by_rating(&self) -> AppResult<Vec<RatedRestaurant>> {
        let mut ranked = Vec::with_capacity(TOP_RATED_LIMIT);

        for (restaurant_id, average_stars) in self.rating_groups().await {
            if ranked.len() == TOP_RATED_LIMIT {
                break;
            }
            // Orphaned reviews don't take a slot
            let Ok(id) = ObjectId::parse_str(&restaurant_id) else {
                continue;
            };
            let Some(document) = self.find_document(&id).await else {
                continue;
            };

            let reviews = self.find_reviews(&id).await;
            ranked.push(RatedRestaurant {
                restaurant: document_to_entity(document).with_reviews(reviews),
                average_stars,
            });
        }

        Ok(ranked)
    }

    async fn remove(&self, restaurant_id: &str) -> AppResult<RemovalOutcome> {
        let id = parse_object_id(restaurant_id)?;

        let restaurants_deleted = {
            let mut restaurants = self.restaurants.write().await;
            let before = restaurants.len();
            restaurants.retain(|d| d.id != Some(id));
            (before - restaurants.len()) as u64
        };

        if self.fail_review_deletes.load(Ordering::SeqCst) {
            return Err(AppError::PartialRemoval {
                restaurants_deleted,
                reason: "review collection unavailable".to_string(),
            });
        }

        let reviews_deleted = {
            let key = id.to_hex();
            let mut reviews = self.reviews.write().await;
            let before = reviews.len();
            reviews.retain(|r| r.restaurant_id != key);
            (before - reviews.len()) as u64
        };

        Ok(RemovalOutcome::new(restaurants_deleted, reviews_deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::restaurant::domain::value_objects::Address;

    fn restaurant(name: &str) -> Restaurant {
        Restaurant::new(
            name,
            Cuisine::Italian,
            Address::new("Rua da Consolação", "12", "São Paulo", "SP", "01302-000"),
        )
    }

    #[tokio::test]
    async fn test_replace_reports_no_change_for_identical_document() {
        let repo = InMemoryRestaurantRepository::new();
        let id = repo.insert_returning_id(&restaurant("Trattoria")).await;

        let same = restaurant("Trattoria").with_id(id.clone());
        assert!(!repo.replace(&same).await.unwrap());

        let renamed = restaurant("Trattoria Nova").with_id(id.clone());
        assert!(repo.replace(&renamed).await.unwrap());
        assert_eq!(
            repo.get_by_id(&id).await.unwrap().unwrap().name(),
            "Trattoria Nova"
        );
    }

    #[tokio::test]
    async fn test_replace_without_id_is_rejected() {
        let repo = InMemoryRestaurantRepository::new();
        let result = repo.replace(&restaurant("Nameless")).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_text_search_ranks_by_matching_terms() {
        let repo = InMemoryRestaurantRepository::new();
        repo.insert(&restaurant("Pizza Express")).await.unwrap();
        repo.insert(&restaurant("Napoli Pizza Bar")).await.unwrap();
        repo.insert(&restaurant("Sushi Bar")).await.unwrap();

        let names: Vec<String> = repo
            .search_by_text("pizza bar")
            .await
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();

        assert_eq!(names, vec!["Napoli Pizza Bar", "Pizza Express", "Sushi Bar"]);
    }

    #[tokio::test]
    async fn test_update_cuisine_same_value_is_no_change() {
        let repo = InMemoryRestaurantRepository::new();
        let id = repo.insert_returning_id(&restaurant("Forno")).await;

        assert!(!repo.update_cuisine(&id, Cuisine::Italian).await.unwrap());
        assert!(repo.update_cuisine(&id, Cuisine::FastFood).await.unwrap());
    }
}
