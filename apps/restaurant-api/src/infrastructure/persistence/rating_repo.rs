//! SQLite adapter for [`RatingRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::database::Database;
use super::rows::{column, decimal_column, push_assignments};
use crate::domain::rating::{NewRating, Rating, RatingRepository};
use crate::domain::shared::{Assignments, RatingId, RestaurantId, StoreError};

const COLUMNS: &str = "id, restaurant_id, rating";

/// Ratings stored in the `ratings` table.
#[derive(Debug, Clone)]
pub struct SqliteRatingRepository {
    db: Arc<Database>,
}

impl SqliteRatingRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_rating(row: &SqliteRow) -> Result<Rating, StoreError> {
        Ok(Rating {
            id: RatingId::new(column(row, "id")?),
            restaurant_id: RestaurantId::new(column(row, "restaurant_id")?),
            rating: decimal_column(row, "rating")?,
        })
    }
}

#[async_trait]
impl RatingRepository for SqliteRatingRepository {
    async fn find_all(&self) -> Result<Vec<Rating>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM ratings ORDER BY id"))
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(Self::row_to_rating).collect()
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Rating>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM ratings WHERE restaurant_id = ? ORDER BY id"
        ))
        .bind(restaurant_id.get())
        .fetch_all(self.db.pool())
        .await?;
        rows.iter().map(Self::row_to_rating).collect()
    }

    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM ratings WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(Self::row_to_rating).transpose()
    }

    async fn insert(&self, rating: &NewRating) -> Result<Rating, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO ratings (restaurant_id, rating) VALUES (?, ?) RETURNING {COLUMNS}"
        ))
        .bind(rating.restaurant_id().get())
        .bind(rating.rating().to_string())
        .fetch_one(self.db.pool())
        .await?;

        let rating = Self::row_to_rating(&row)?;
        debug!(rating_id = %rating.id, restaurant_id = %rating.restaurant_id, "Rating inserted");
        Ok(rating)
    }

    async fn update(
        &self,
        id: RatingId,
        changes: &Assignments,
    ) -> Result<Option<Rating>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE ratings");
        push_assignments(&mut builder, changes)?;
        builder
            .push(" WHERE id = ")
            .push_bind(id.get())
            .push(format!(" RETURNING {COLUMNS}"));

        let row = builder.build().fetch_optional(self.db.pool()).await?;
        row.as_ref().map(Self::row_to_rating).transpose()
    }
}
