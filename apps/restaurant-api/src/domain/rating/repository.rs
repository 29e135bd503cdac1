//! Rating Repository Trait

use async_trait::async_trait;

use super::model::{NewRating, Rating};
use crate::domain::shared::{Assignments, RatingId, RestaurantId, StoreError};

/// Repository trait for rating persistence.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// All ratings, ordered by id.
    async fn find_all(&self) -> Result<Vec<Rating>, StoreError>;

    /// Ratings of one restaurant, ordered by id.
    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Rating>, StoreError>;

    /// A single rating, or `None` when absent.
    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, StoreError>;

    /// Insert a rating and return the stored row.
    ///
    /// A rating for a missing restaurant fails with [`StoreError::Integrity`].
    async fn insert(&self, rating: &NewRating) -> Result<Rating, StoreError>;

    /// Apply `changes` and return the updated row, or `None` when absent.
    async fn update(
        &self,
        id: RatingId,
        changes: &Assignments,
    ) -> Result<Option<Rating>, StoreError>;
}
