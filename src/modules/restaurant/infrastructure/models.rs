use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::modules::restaurant::domain::value_objects::Cuisine;

pub const RESTAURANTS_COLLECTION: &str = "restaurants";
pub const REVIEWS_COLLECTION: &str = "reviews";

// ============= RESTAURANT DOCUMENTS =============

// Unknown fields (e.g. a text score projection) are ignored on read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub cuisine: Cuisine,
    pub address: AddressDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDocument {
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

// ============= REVIEW DOCUMENTS =============

// Reviews live in their own collection and point back at the restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub restaurant_id: String,
    pub stars: i32,
    pub comment: Option<String>,
}

// Output row of the rating `$group` stage
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingGroup {
    #[serde(rename = "_id")]
    pub restaurant_id: String,
    #[serde(rename = "averageStars")]
    pub average_stars: f64,
}
