//! Conversions between stored documents and domain values.
//!
//! Both repository adapters go through these functions so a review inserted
//! directly and a review attached during aggregation have the same shape.

use mongodb::bson::oid::ObjectId;

use super::models::{AddressDocument, RestaurantDocument, ReviewDocument};
use crate::modules::restaurant::domain::entities::Restaurant;
use crate::modules::restaurant::domain::value_objects::{Address, Review};
use crate::shared::errors::{AppError, AppResult};

pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a valid restaurant id", id)))
}

pub fn document_to_entity(document: RestaurantDocument) -> Restaurant {
    let address = Address::new(
        document.address.street,
        document.address.number,
        document.address.city,
        document.address.state,
        document.address.postal_code,
    );

    let restaurant = Restaurant::new(document.name, document.cuisine, address);
    match document.id {
        Some(id) => restaurant.with_id(id.to_hex()),
        None => restaurant,
    }
}

/// Build the stored shape; `id` is `None` for inserts so the store assigns one
pub fn entity_to_document(restaurant: &Restaurant, id: Option<ObjectId>) -> RestaurantDocument {
    let address = restaurant.address();
    RestaurantDocument {
        id,
        name: restaurant.name().to_string(),
        cuisine: restaurant.cuisine(),
        address: AddressDocument {
            street: address.street.clone(),
            number: address.number.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
        },
    }
}

pub fn review_to_document(restaurant_id: &ObjectId, review: &Review) -> ReviewDocument {
    ReviewDocument {
        id: None,
        restaurant_id: restaurant_id.to_hex(),
        stars: review.stars,
        comment: review.comment.clone(),
    }
}

pub fn document_to_review(document: ReviewDocument) -> Review {
    Review::new(document.stars, document.comment)
}
