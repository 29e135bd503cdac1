//! Restaurant Repository Trait
//!
//! Defines the persistence abstraction for restaurants.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::model::{NewRestaurant, Restaurant, RestaurantDetail};
use crate::domain::shared::{Assignments, RestaurantId, StoreError};

/// Repository trait for restaurant persistence.
///
/// Deleting is deliberately absent: a restaurant is only ever removed
/// together with its dependents by the cascading delete use case.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// All restaurants, ordered by id.
    async fn find_all(&self) -> Result<Vec<Restaurant>, StoreError>;

    /// Restaurants whose cuisine list contains `cuisine` (exact match).
    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>, StoreError>;

    /// A restaurant and its dishes, or `None` when absent.
    async fn find_by_id(&self, id: RestaurantId) -> Result<Option<RestaurantDetail>, StoreError>;

    /// Whether a restaurant with this id exists.
    async fn exists(&self, id: RestaurantId) -> Result<bool, StoreError>;

    /// Insert a restaurant and return the stored row.
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, StoreError>;

    /// Apply `changes` and return the updated row, or `None` when absent.
    async fn update(
        &self,
        id: RestaurantId,
        changes: &Assignments,
    ) -> Result<Option<Restaurant>, StoreError>;
}
