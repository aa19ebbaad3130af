use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::{Collection, Cursor};

use crate::modules::restaurant::domain::{
    entities::Restaurant,
    repositories::{RatedRestaurant, RemovalOutcome, RestaurantRepository, TOP_RATED_LIMIT},
    value_objects::{Cuisine, Review},
};
use crate::modules::restaurant::infrastructure::mapper::{
    document_to_entity, document_to_review, entity_to_document, parse_object_id,
    review_to_document,
};
use crate::modules::restaurant::infrastructure::models::{
    RatingGroup, RestaurantDocument, ReviewDocument, RESTAURANTS_COLLECTION, REVIEWS_COLLECTION,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::Database;
use crate::{log_debug, log_error, log_warn};

/// MongoDB adapter for the restaurant port.
///
/// Collections are used without client-side locking; each write relies on the
/// server's single-document atomicity and no multi-document transaction is
/// opened. Cursor-producing calls carry a server-side `max_time`.
pub struct MongoRestaurantRepository {
    restaurants: Collection<RestaurantDocument>,
    reviews: Collection<ReviewDocument>,
    query_timeout: Duration,
}

impl MongoRestaurantRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            restaurants: db.collection(RESTAURANTS_COLLECTION),
            reviews: db.collection(REVIEWS_COLLECTION),
            query_timeout: db.operation_timeout(),
        }
    }

    async fn collect_restaurants(cursor: Cursor<RestaurantDocument>) -> AppResult<Vec<Restaurant>> {
        let documents: Vec<RestaurantDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(document_to_entity).collect())
    }

    async fn find_restaurant(&self, id: ObjectId) -> AppResult<Option<Restaurant>> {
        let document = self.restaurants.find_one(doc! { "_id": id }).await?;
        Ok(document.map(document_to_entity))
    }

    async fn find_reviews(&self, id: &ObjectId) -> AppResult<Vec<Review>> {
        let cursor = self
            .reviews
            .find(doc! { "restaurantId": id.to_hex() })
            .max_time(self.query_timeout)
            .await?;
        let documents: Vec<ReviewDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(document_to_review).collect())
    }

    /// Load the restaurant behind a rating group with all of its reviews.
    /// A restaurant removed after the aggregation ran is skipped.
    async fn hydrate(&self, group: RatingGroup) -> AppResult<Option<RatedRestaurant>> {
        let id = match ObjectId::parse_str(&group.restaurant_id) {
            Ok(id) => id,
            Err(_) => {
                log_warn!(
                    "Skipping rating group with malformed restaurant id '{}'",
                    group.restaurant_id
                );
                return Ok(None);
            }
        };

        let Some(restaurant) = self.find_restaurant(id).await? else {
            log_warn!(
                "Skipping orphaned reviews for missing restaurant {}",
                group.restaurant_id
            );
            return Ok(None);
        };

        let reviews = self.find_reviews(&id).await?;
        Ok(Some(RatedRestaurant {
            restaurant: restaurant.with_reviews(reviews),
            average_stars: group.average_stars,
        }))
    }

    /// Groups whose restaurant is gone are dropped before `$limit`, so orphaned
    /// reviews never push a live restaurant out of the ranking.
    fn top_rated_pipeline(limit: usize) -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$restaurantId", "averageStars": { "$avg": "$stars" } } },
            doc! { "$addFields": { "restaurantOid": {
                "$convert": { "input": "$_id", "to": "objectId", "onError": null, "onNull": null }
            } } },
            doc! { "$lookup": {
                "from": RESTAURANTS_COLLECTION,
                "localField": "restaurantOid",
                "foreignField": "_id",
                "as": "restaurant",
            } },
            doc! { "$match": { "restaurant": { "$ne": [] } } },
            // `_id` keeps equal averages in a repeatable order
            doc! { "$sort": { "averageStars": -1, "_id": 1 } },
            doc! { "$limit": limit as i64 },
            doc! { "$project": { "averageStars": 1 } },
        ]
    }
}

#[async_trait]
impl RestaurantRepository for MongoRestaurantRepository {
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<()> {
        let timer = TimedOperation::new("restaurants.insert");
        let result = self
            .restaurants
            .insert_one(entity_to_document(restaurant, None))
            .await?;
        timer.finish();

        log_debug!("Inserted restaurant with id {}", result.inserted_id);
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<Restaurant>> {
        let timer = TimedOperation::new("restaurants.get_all");
        let cursor = self
            .restaurants
            .find(doc! {})
            .max_time(self.query_timeout)
            .await?;
        let restaurants = Self::collect_restaurants(cursor).await?;
        timer.finish_with_info(&format!("{} documents", restaurants.len()));

        Ok(restaurants)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        let id = parse_object_id(id)?;
        LogContext::db_operation("find_one", RESTAURANTS_COLLECTION, None);
        self.find_restaurant(id).await
    }

    async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool> {
        let id = restaurant.id().ok_or_else(|| {
            AppError::InvalidInput("Cannot replace a restaurant without an id".to_string())
        })?;
        let id = parse_object_id(id)?;

        let result = self
            .restaurants
            .replace_one(doc! { "_id": id }, entity_to_document(restaurant, Some(id)))
            .await?;

        log_debug!(
            "Replace restaurant {}: matched {}, modified {}",
            id,
            result.matched_count,
            result.modified_count
        );
        Ok(result.modified_count > 0)
    }

    async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool> {
        let id = parse_object_id(id)?;

        let result = self
            .restaurants
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "cuisine": cuisine.code() } },
            )
            .await?;

        log_debug!(
            "Update cuisine of {} to {}: matched {}, modified {}",
            id,
            cuisine,
            result.matched_count,
            result.modified_count
        );
        Ok(result.modified_count > 0)
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>> {
        LogContext::search_operation("name", fragment, None);

        let filter = doc! {
            "name": { "$regex": regex::escape(fragment), "$options": "i" }
        };
        let cursor = self
            .restaurants
            .find(filter)
            .max_time(self.query_timeout)
            .await?;
        let restaurants = Self::collect_restaurants(cursor).await?;

        LogContext::search_operation("name", fragment, Some(restaurants.len()));
        Ok(restaurants)
    }

    async fn search_by_text(&self, query: &str) -> AppResult<Vec<Restaurant>> {
        LogContext::search_operation("text", query, None);

        let relevance = doc! { "score": { "$meta": "textScore" } };
        let cursor = self
            .restaurants
            .find(doc! { "$text": { "$search": query } })
            .projection(relevance.clone())
            .sort(relevance)
            .max_time(self.query_timeout)
            .await?;
        let restaurants = Self::collect_restaurants(cursor).await?;

        LogContext::search_operation("text", query, Some(restaurants.len()));
        Ok(restaurants)
    }

    async fn add_review(&self, restaurant_id: &str, review: &Review) -> AppResult<()> {
        let id = parse_object_id(restaurant_id)?;
        self.reviews
            .insert_one(review_to_document(&id, review))
            .await?;

        log_debug!("Recorded {}-star review for {}", review.stars, id);
        Ok(())
    }

    async fn reviews_for(&self, restaurant_id: &str) -> AppResult<Vec<Review>> {
        let id = parse_object_id(restaurant_id)?;
        self.find_reviews(&id).await
    }

    async fn top3_by_rating(&self) -> AppResult<Vec<RatedRestaurant>> {
        let timer = TimedOperation::new("reviews.top3_by_rating");

        let cursor = self
            .reviews
            .aggregate(Self::top_rated_pipeline(TOP_RATED_LIMIT))
            .max_time(self.query_timeout)
            .await?;
        let rows: Vec<Document> = cursor.try_collect().await?;
        let groups = rows
            .into_iter()
            .map(bson::from_document::<RatingGroup>)
            .collect::<Result<Vec<_>, _>>()?;

        let ranked = try_join_all(groups.into_iter().map(|group| self.hydrate(group)))
            .await?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        timer.finish_with_info(&format!("{} ranked", ranked.len()));
        Ok(ranked)
    }

    async fn remove(&self, restaurant_id: &str) -> AppResult<RemovalOutcome> {
        let id = parse_object_id(restaurant_id)?;

        let restaurants_deleted = self
            .restaurants
            .delete_many(doc! { "_id": id })
            .await?
            .deleted_count;

        // Second, independent phase. A failure here leaves orphaned reviews.
        let reviews_deleted = match self
            .reviews
            .delete_many(doc! { "restaurantId": id.to_hex() })
            .await
        {
            Ok(result) => result.deleted_count,
            Err(e) => {
                log_error!(
                    "Deleted {} restaurant document(s) for {} but review cleanup failed: {}",
                    restaurants_deleted,
                    id,
                    e
                );
                return Err(AppError::PartialRemoval {
                    restaurants_deleted,
                    reason: e.to_string(),
                });
            }
        };

        LogContext::db_operation("remove", RESTAURANTS_COLLECTION, None);
        Ok(RemovalOutcome::new(restaurants_deleted, reviews_deleted))
    }
}
