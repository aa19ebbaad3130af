use std::sync::Arc;

use super::commands::{NewRestaurantCommand, ReplaceRestaurantCommand, ReviewCommand};
use crate::modules::restaurant::domain::{
    cuisine_from_code, RatedRestaurant, RemovalOutcome, Restaurant, RestaurantRepository, Review,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::OperationLimits;
use crate::shared::validation::Validate;
use crate::{log_debug, log_info, log_warn};

/// Entry point for the routing layer.
///
/// Turns raw payloads into validated entities before anything reaches the
/// repository, and turns repository signals (`None`, `false`) into
/// classified errors. Clones share the repository, so per-request limits can
/// be set with `with_limits` on a clone.
#[derive(Clone)]
pub struct RestaurantService {
    restaurant_repo: Arc<dyn RestaurantRepository>,
    limits: OperationLimits,
}

impl RestaurantService {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepository>) -> Self {
        Self {
            restaurant_repo,
            limits: OperationLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: OperationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub async fn register(&self, command: NewRestaurantCommand) -> AppResult<()> {
        let restaurant = command.into_restaurant()?;
        ensure_valid(&restaurant)?;

        self.limits
            .run("insert", self.restaurant_repo.insert(&restaurant))
            .await?;

        log_info!("Registered restaurant '{}'", restaurant.name());
        Ok(())
    }

    pub async fn list_all(&self) -> AppResult<Vec<Restaurant>> {
        self.limits
            .run("get_all", self.restaurant_repo.get_all())
            .await
    }

    pub async fn get(&self, id: &str) -> AppResult<Restaurant> {
        self.limits
            .run("get_by_id", self.restaurant_repo.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant with ID {} not found", id)))
    }

    pub async fn replace(&self, command: ReplaceRestaurantCommand) -> AppResult<()> {
        self.get(&command.id).await?;

        let restaurant = command.into_restaurant()?;
        ensure_valid(&restaurant)?;

        let changed = self
            .limits
            .run("replace", self.restaurant_repo.replace(&restaurant))
            .await?;
        if !changed {
            return Err(AppError::NoChangeApplied(format!(
                "Restaurant {} was not modified",
                restaurant.id().unwrap_or_default()
            )));
        }

        log_info!("Replaced restaurant {}", restaurant.id().unwrap_or_default());
        Ok(())
    }

    pub async fn change_cuisine(&self, id: &str, cuisine_code: i32) -> AppResult<()> {
        self.get(id).await?;
        let cuisine = cuisine_from_code(cuisine_code)?;

        let changed = self
            .limits
            .run("update_cuisine", self.restaurant_repo.update_cuisine(id, cuisine))
            .await?;
        if !changed {
            return Err(AppError::NoChangeApplied(format!(
                "Cuisine of restaurant {} was not modified",
                id
            )));
        }

        log_debug!("Restaurant {} cuisine set to {}", id, cuisine);
        Ok(())
    }

    pub async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>> {
        self.limits
            .run("search_by_name", self.restaurant_repo.search_by_name(fragment))
            .await
    }

    pub async fn search_by_text(&self, query: &str) -> AppResult<Vec<Restaurant>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search text cannot be empty".to_string(),
            ));
        }

        self.limits
            .run("search_by_text", self.restaurant_repo.search_by_text(query))
            .await
    }

    pub async fn rate(&self, id: &str, command: ReviewCommand) -> AppResult<()> {
        self.get(id).await?;

        let review = Review::from(command);
        ensure_valid(&review)?;

        self.limits
            .run("add_review", self.restaurant_repo.add_review(id, &review))
            .await?;

        log_debug!("Restaurant {} rated {} stars", id, review.stars);
        Ok(())
    }

    pub async fn reviews(&self, id: &str) -> AppResult<Vec<Review>> {
        self.get(id).await?;
        self.limits
            .run("reviews_for", self.restaurant_repo.reviews_for(id))
            .await
    }

    pub async fn top3(&self) -> AppResult<Vec<RatedRestaurant>> {
        self.limits
            .run("top3_by_rating", self.restaurant_repo.top3_by_rating())
            .await
    }

    pub async fn remove(&self, id: &str) -> AppResult<RemovalOutcome> {
        self.get(id).await?;

        let outcome = self
            .limits
            .run("remove", self.restaurant_repo.remove(id))
            .await
            .map_err(|e| {
                if let AppError::PartialRemoval {
                    restaurants_deleted,
                    ..
                } = &e
                {
                    log_warn!(
                        "Restaurant {} removed ({} document(s)) with reviews left behind",
                        id,
                        restaurants_deleted
                    );
                }
                e
            })?;

        log_info!(
            "Removed {} restaurant document(s) and {} review(s) for {}",
            outcome.restaurants_deleted,
            outcome.reviews_deleted,
            id
        );
        Ok(outcome)
    }
}

fn ensure_valid<V: Validate>(value: &V) -> AppResult<()> {
    let result = value.validate();
    if result.is_valid {
        Ok(())
    } else {
        Err(AppError::ValidationError(result.errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::restaurant::domain::{Address, Cuisine};
    use crate::shared::errors::ErrorKind;
    use async_trait::async_trait;
    use mockall::mock;
    use std::time::Duration;

    const ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    mock! {
        pub Repo {}

        #[async_trait]
        impl RestaurantRepository for Repo {
            async fn insert(&self, restaurant: &Restaurant) -> AppResult<()>;
            async fn get_all(&self) -> AppResult<Vec<Restaurant>>;
            async fn get_by_id(&self, id: &str) -> AppResult<Option<Restaurant>>;
            async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool>;
            async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool>;
            async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>>;
            async fn search_by_text(&self, query: &str) -> AppResult<Vec<Restaurant>>;
            async fn add_review(&self, restaurant_id: &str, review: &Review) -> AppResult<()>;
            async fn reviews_for(&self, restaurant_id: &str) -> AppResult<Vec<Review>>;
            async fn top3_by_rating(&self) -> AppResult<Vec<RatedRestaurant>>;
            async fn remove(&self, restaurant_id: &str) -> AppResult<RemovalOutcome>;
        }
    }

    fn stored() -> Restaurant {
        Restaurant::new(
            "Cantina",
            Cuisine::Italian,
            Address::new("Rua Treze de Maio", "20", "São Paulo", "SP", "01327-000"),
        )
        .with_id(ID)
    }

    fn command(name: &str, cuisine: i32, street: &str) -> NewRestaurantCommand {
        NewRestaurantCommand {
            name: name.to_string(),
            cuisine,
            street: street.to_string(),
            number: "20".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            postal_code: "01327-000".to_string(),
        }
    }

    fn service(repo: MockRepo) -> RestaurantService {
        RestaurantService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_register_inserts_valid_restaurant() {
        let mut repo = MockRepo::new();
        repo.expect_insert()
            .withf(|r: &Restaurant| r.name() == "Cantina" && r.cuisine() == Cuisine::Italian)
            .times(1)
            .returning(|_| Ok(()));

        let result = service(repo)
            .register(command("Cantina", 2, "Rua Treze de Maio"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_never_persists_invalid_restaurant() {
        let mut repo = MockRepo::new();
        repo.expect_insert().never();

        let err = service(repo)
            .register(command(&"x".repeat(31), 2, ""))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BadInput);
        assert_eq!(
            err.messages(),
            vec![
                "Name can have at most 30 characters.".to_string(),
                "Street cannot be empty.".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_cuisine() {
        let mut repo = MockRepo::new();
        repo.expect_insert().never();

        let err = service(repo)
            .register(command("Cantina", 0, "Rua"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownCuisineCode(0)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id()
            .withf(|id: &str| id == ID)
            .returning(|_| Ok(None));

        let err = service(repo).get(ID).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_replace_without_change_is_no_change_applied() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().returning(|_| Ok(Some(stored())));
        repo.expect_replace().times(1).returning(|_| Ok(false));

        let err = service(repo)
            .replace(ReplaceRestaurantCommand {
                id: ID.to_string(),
                restaurant: command("Cantina", 2, "Rua Treze de Maio"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoChangeApplied(_)));
    }

    #[tokio::test]
    async fn test_change_cuisine_checks_existence_first() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update_cuisine().never();

        let err = service(repo).change_cuisine(ID, 3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_change_cuisine_updates() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().returning(|_| Ok(Some(stored())));
        repo.expect_update_cuisine()
            .withf(|id: &str, cuisine: &Cuisine| id == ID && *cuisine == Cuisine::Arabic)
            .times(1)
            .returning(|_, _| Ok(true));

        assert!(service(repo).change_cuisine(ID, 3).await.is_ok());
    }

    #[tokio::test]
    async fn test_rate_rejects_out_of_range_stars() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().returning(|_| Ok(Some(stored())));
        repo.expect_add_review().never();

        let err = service(repo)
            .rate(
                ID,
                ReviewCommand {
                    stars: 6,
                    comment: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.messages(), vec!["Stars must be between 1 and 5."]);
    }

    #[tokio::test]
    async fn test_remove_surfaces_partial_removal() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().returning(|_| Ok(Some(stored())));
        repo.expect_remove().returning(|_| {
            Err(AppError::PartialRemoval {
                restaurants_deleted: 1,
                reason: "connection reset".to_string(),
            })
        });

        let err = service(repo).remove(ID).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::PartialRemoval {
                restaurants_deleted: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_text_query_is_bad_input() {
        let mut repo = MockRepo::new();
        repo.expect_search_by_text().never();

        let err = service(repo).search_by_text("  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadInput);
    }

    #[tokio::test]
    async fn test_limits_apply_to_repository_calls() {
        let mut repo = MockRepo::new();
        repo.expect_get_all().returning(|| Ok(Vec::new()));

        let service = service(repo)
            .with_limits(OperationLimits::new().with_timeout(Duration::from_secs(5)));
        assert!(service.list_all().await.unwrap().is_empty());
    }
}
