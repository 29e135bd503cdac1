//! Dish Repository Trait
//!
//! Every lookup and mutation is scoped by the owning restaurant so a dish id
//! can never reach across restaurants.

use async_trait::async_trait;

use super::model::{Dish, NewDish};
use crate::domain::shared::{Assignments, DishId, RestaurantId, StoreError};

/// Repository trait for dish persistence.
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Dishes of one restaurant, ordered by id.
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId)
    -> Result<Vec<Dish>, StoreError>;

    /// The dish with `dish_id` when it belongs to `restaurant_id`.
    async fn find_scoped(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<Dish>, StoreError>;

    /// Whether `dish_id` exists and belongs to `restaurant_id`.
    async fn exists_in_restaurant(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<bool, StoreError>;

    /// Insert a dish and return the stored row.
    async fn insert(&self, dish: &NewDish) -> Result<Dish, StoreError>;

    /// Apply `changes` to the scoped dish and return the updated row.
    ///
    /// Returns `None` when the dish is absent or owned by another restaurant.
    async fn update(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
        changes: &Assignments,
    ) -> Result<Option<Dish>, StoreError>;
}
