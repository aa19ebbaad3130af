use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind as MongoErrorKind;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;

use super::models::RESTAURANTS_COLLECTION;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;
use crate::{log_info, log_warn};

pub const TEXT_INDEX_NAME: &str = "restaurants_text";

const NAMESPACE_NOT_FOUND: i32 = 26;

/// Make sure full-text search has an index to run against.
///
/// Called once at startup. With `create_if_missing` off, a missing index is a
/// configuration error instead of a per-query failure later on.
pub async fn ensure_text_index(db: &Database, create_if_missing: bool) -> AppResult<()> {
    let restaurants = db.collection::<Document>(RESTAURANTS_COLLECTION);

    let existing: Vec<IndexModel> = match restaurants.list_indexes().await {
        Ok(cursor) => cursor.try_collect().await?,
        Err(e) if is_namespace_not_found(&e) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    if existing.iter().any(is_text_index_on_name) {
        log_info!("Text index on '{}.name' present", RESTAURANTS_COLLECTION);
        return Ok(());
    }

    if !create_if_missing {
        return Err(AppError::Configuration(format!(
            "Collection '{}' has no text index on 'name'; full-text search is unavailable",
            RESTAURANTS_COLLECTION
        )));
    }

    log_warn!(
        "Text index on '{}.name' missing, creating '{}'",
        RESTAURANTS_COLLECTION,
        TEXT_INDEX_NAME
    );
    restaurants.create_index(text_index_model()).await?;
    Ok(())
}

pub fn text_index_model() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "name": "text", "description": "text" })
        .options(
            IndexOptions::builder()
                .name(TEXT_INDEX_NAME.to_string())
                .build(),
        )
        .build()
}

/// The server reports text indexes as `{_fts: "text", _ftsx: 1}` with the
/// indexed fields listed under `weights`.
pub fn is_text_index_on_name(index: &IndexModel) -> bool {
    let declared = index.keys.get_str("name").map(|v| v == "text").unwrap_or(false);

    let stored = index.keys.get_str("_fts").map(|v| v == "text").unwrap_or(false)
        && index
            .options
            .as_ref()
            .and_then(|o| o.weights.as_ref())
            .map(|w| w.contains_key("name"))
            .unwrap_or(false);

    declared || stored
}

fn is_namespace_not_found(err: &mongodb::error::Error) -> bool {
    matches!(*err.kind, MongoErrorKind::Command(ref cmd) if cmd.code == NAMESPACE_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_server_reported_text_index() {
        let index = IndexModel::builder()
            .keys(doc! { "_fts": "text", "_ftsx": 1 })
            .options(
                IndexOptions::builder()
                    .weights(doc! { "name": 1, "description": 1 })
                    .build(),
            )
            .build();
        assert!(is_text_index_on_name(&index));
    }

    #[test]
    fn test_rejects_text_index_without_name() {
        let index = IndexModel::builder()
            .keys(doc! { "_fts": "text", "_ftsx": 1 })
            .options(
                IndexOptions::builder()
                    .weights(doc! { "description": 1 })
                    .build(),
            )
            .build();
        assert!(!is_text_index_on_name(&index));

        let plain = IndexModel::builder().keys(doc! { "name": 1 }).build();
        assert!(!is_text_index_on_name(&plain));
    }

    #[test]
    fn test_model_declares_name_text_key() {
        let model = text_index_model();
        assert!(is_text_index_on_name(&model));
        assert_eq!(
            model.options.and_then(|o| o.name).as_deref(),
            Some(TEXT_INDEX_NAME)
        );
    }
}
