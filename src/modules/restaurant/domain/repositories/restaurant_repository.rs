use async_trait::async_trait;
use serde::Serialize;

use crate::modules::restaurant::domain::entities::Restaurant;
use crate::modules::restaurant::domain::value_objects::{Cuisine, Review};
use crate::shared::errors::AppResult;

/// Number of entries returned by the rating ranking
pub const TOP_RATED_LIMIT: usize = 3;

/// A ranked restaurant with every one of its reviews attached
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedRestaurant {
    pub restaurant: Restaurant,
    pub average_stars: f64,
}

/// Counts reported by the two independent delete phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalOutcome {
    pub restaurants_deleted: u64,
    pub reviews_deleted: u64,
}

impl RemovalOutcome {
    pub fn new(restaurants_deleted: u64, reviews_deleted: u64) -> Self {
        Self {
            restaurants_deleted,
            reviews_deleted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants_deleted == 0 && self.reviews_deleted == 0
    }
}

impl From<RemovalOutcome> for (u64, u64) {
    fn from(outcome: RemovalOutcome) -> Self {
        (outcome.restaurants_deleted, outcome.reviews_deleted)
    }
}

/// Port (interface) for restaurant persistence.
///
/// Implementations map entities to stored documents and never validate;
/// callers hand over entities that already passed `Validate`.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Store a new restaurant; the store assigns its id
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<()>;

    /// Every restaurant, in the store's natural order
    async fn get_all(&self) -> AppResult<Vec<Restaurant>>;

    /// Point lookup; `None` when no document has this id
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Restaurant>>;

    /// Replace the whole document keyed by the restaurant's id.
    /// `false` when nothing matched or nothing changed.
    async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool>;

    /// Set only the cuisine. `false` when nothing matched or nothing changed.
    async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool>;

    /// Case-insensitive substring match over the name
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>>;

    /// Relevance-ranked full-text search over the indexed text fields
    async fn search_by_text(&self, query: &str) -> AppResult<Vec<Restaurant>>;

    /// Record a rating in the review collection
    async fn add_review(&self, restaurant_id: &str, review: &Review) -> AppResult<()>;

    /// Every review that references the restaurant
    async fn reviews_for(&self, restaurant_id: &str) -> AppResult<Vec<Review>>;

    /// Up to three restaurants with the highest mean stars, best first
    async fn top3_by_rating(&self) -> AppResult<Vec<RatedRestaurant>>;

    /// Delete the restaurant, then independently delete its reviews.
    /// Not atomic: see `AppError::PartialRemoval`.
    async fn remove(&self, restaurant_id: &str) -> AppResult<RemovalOutcome>;
}
