//! SQLite adapter for [`DishRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::database::Database;
use super::rows::{column, decimal_column, push_assignments};
use crate::domain::dish::{Dish, DishRepository, NewDish};
use crate::domain::shared::{Assignments, DishId, RestaurantId, StoreError};

const COLUMNS: &str = "id, restaurant_id, name, description, price";

/// Dishes stored in the `dishes` table.
#[derive(Debug, Clone)]
pub struct SqliteDishRepository {
    db: Arc<Database>,
}

impl SqliteDishRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_dish(row: &SqliteRow) -> Result<Dish, StoreError> {
        Ok(Dish {
            id: DishId::new(column(row, "id")?),
            restaurant_id: RestaurantId::new(column(row, "restaurant_id")?),
            name: column(row, "name")?,
            description: column(row, "description")?,
            price: decimal_column(row, "price")?,
        })
    }
}

#[async_trait]
impl DishRepository for SqliteDishRepository {
    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Dish>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM dishes WHERE restaurant_id = ? ORDER BY id"
        ))
        .bind(restaurant_id.get())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_dish).collect()
    }

    async fn find_scoped(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<Dish>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM dishes WHERE id = ? AND restaurant_id = ?"
        ))
        .bind(dish_id.get())
        .bind(restaurant_id.get())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_dish).transpose()
    }

    async fn exists_in_restaurant(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<bool, StoreError> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM dishes WHERE id = ? AND restaurant_id = ?",
        )
        .bind(dish_id.get())
        .bind(restaurant_id.get())
        .fetch_one(self.db.pool())
        .await?;
        Ok(found > 0)
    }

    async fn insert(&self, dish: &NewDish) -> Result<Dish, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO dishes (restaurant_id, name, description, price) \
             VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(dish.restaurant_id().get())
        .bind(dish.name())
        .bind(dish.description())
        .bind(dish.price().to_string())
        .fetch_one(self.db.pool())
        .await?;

        let dish = Self::row_to_dish(&row)?;
        debug!(dish_id = %dish.id, restaurant_id = %dish.restaurant_id, "Dish inserted");
        Ok(dish)
    }

    async fn update(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
        changes: &Assignments,
    ) -> Result<Option<Dish>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE dishes");
        push_assignments(&mut builder, changes)?;
        builder
            .push(" WHERE id = ")
            .push_bind(dish_id.get())
            .push(" AND restaurant_id = ")
            .push_bind(restaurant_id.get())
            .push(format!(" RETURNING {COLUMNS}"));

        let row = builder.build().fetch_optional(self.db.pool()).await?;
        debug!(dish_id = %dish_id, restaurant_id = %restaurant_id, updated = row.is_some(), "Dish update");
        row.as_ref().map(Self::row_to_dish).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish::DishPatch;
    use rust_decimal_macros::dec;

    async fn setup() -> (Arc<Database>, SqliteDishRepository, RestaurantId, RestaurantId) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        for name in ["First", "Second"] {
            db.execute(
                "INSERT INTO restaurants (name, is_kosher, cuisines) VALUES (?, 0, '[]')",
                &[name.into()],
            )
            .await
            .unwrap();
        }
        let repo = SqliteDishRepository::new(Arc::clone(&db));
        (db, repo, RestaurantId::new(1), RestaurantId::new(2))
    }

    fn new_dish(restaurant_id: RestaurantId, name: &str) -> NewDish {
        NewDish::new(
            restaurant_id,
            Some(name.to_string()),
            Some("House special".to_string()),
            Some(dec!(10)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_and_scoped_lookup() {
        let (_db, repo, first, second) = setup().await;
        let dish = repo.insert(&new_dish(first, "Shakshuka")).await.unwrap();

        assert_eq!(dish.price.to_string(), "10.00");
        assert!(repo.exists_in_restaurant(dish.id, first).await.unwrap());
        assert!(!repo.exists_in_restaurant(dish.id, second).await.unwrap());
        assert_eq!(repo.find_scoped(dish.id, first).await.unwrap(), Some(dish.clone()));
        assert_eq!(repo.find_scoped(dish.id, second).await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_for_missing_restaurant_violates_integrity() {
        let (_db, repo, _, _) = setup().await;
        let err = repo
            .insert(&new_dish(RestaurantId::new(77), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn update_is_scoped_to_restaurant() {
        let (_db, repo, first, second) = setup().await;
        let dish = repo.insert(&new_dish(first, "Sabich")).await.unwrap();

        let patch = DishPatch {
            price: Some(dec!(12.5)),
            ..DishPatch::default()
        };
        let changes = patch.into_assignments().unwrap();

        assert!(repo.update(dish.id, second, &changes).await.unwrap().is_none());
        assert_eq!(
            repo.find_scoped(dish.id, first).await.unwrap().unwrap().price,
            dec!(10.00)
        );

        let updated = repo.update(dish.id, first, &changes).await.unwrap().unwrap();
        assert_eq!(updated.price.to_string(), "12.50");
        assert_eq!(updated.name, "Sabich");
    }

    #[tokio::test]
    async fn dishes_are_listed_per_restaurant() {
        let (_db, repo, first, second) = setup().await;
        repo.insert(&new_dish(first, "A")).await.unwrap();
        repo.insert(&new_dish(first, "B")).await.unwrap();
        repo.insert(&new_dish(second, "C")).await.unwrap();

        let names: Vec<_> = repo
            .find_by_restaurant(first)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
