//! SQLite adapter for [`RestaurantRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::QueryBuilder;
use sqlx::Sqlite;
use sqlx::sqlite::SqliteRow;
use tracing::debug;

use super::database::Database;
use super::dish_repo::SqliteDishRepository;
use super::rows::{column, push_assignments, text_list_column};
use crate::domain::dish::DishRepository;
use crate::domain::restaurant::{NewRestaurant, Restaurant, RestaurantDetail, RestaurantRepository};
use crate::domain::shared::{Assignments, RestaurantId, StoreError};

const COLUMNS: &str = "id, name, is_kosher, cuisines";

/// Restaurants stored in the `restaurants` table.
#[derive(Debug, Clone)]
pub struct SqliteRestaurantRepository {
    db: Arc<Database>,
    dishes: SqliteDishRepository,
}

impl SqliteRestaurantRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        let dishes = SqliteDishRepository::new(Arc::clone(&db));
        Self { db, dishes }
    }

    fn row_to_restaurant(row: &SqliteRow) -> Result<Restaurant, StoreError> {
        Ok(Restaurant {
            id: RestaurantId::new(column(row, "id")?),
            name: column(row, "name")?,
            is_kosher: column(row, "is_kosher")?,
            cuisines: text_list_column(row, "cuisines")?,
        })
    }
}

#[async_trait]
impl RestaurantRepository for SqliteRestaurantRepository {
    async fn find_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM restaurants ORDER BY id"))
            .fetch_all(self.db.pool())
            .await?;

        debug!(count = rows.len(), "Loaded restaurants");
        rows.iter().map(Self::row_to_restaurant).collect()
    }

    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM restaurants \
             WHERE EXISTS (SELECT 1 FROM json_each(restaurants.cuisines) WHERE json_each.value = ?) \
             ORDER BY id"
        ))
        .bind(cuisine)
        .fetch_all(self.db.pool())
        .await?;

        debug!(cuisine, count = rows.len(), "Loaded restaurants by cuisine");
        rows.iter().map(Self::row_to_restaurant).collect()
    }

    async fn find_by_id(&self, id: RestaurantId) -> Result<Option<RestaurantDetail>, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM restaurants WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let restaurant = Self::row_to_restaurant(&row)?;
        let dishes = self.dishes.find_by_restaurant(id).await?;
        Ok(Some(RestaurantDetail { restaurant, dishes }))
    }

    async fn exists(&self, id: RestaurantId) -> Result<bool, StoreError> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurants WHERE id = ?")
            .bind(id.get())
            .fetch_one(self.db.pool())
            .await?;
        Ok(found > 0)
    }

    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, StoreError> {
        let cuisines = serde_json::to_string(restaurant.cuisines())?;
        let row = sqlx::query(&format!(
            "INSERT INTO restaurants (name, is_kosher, cuisines) VALUES (?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(restaurant.name())
        .bind(restaurant.is_kosher())
        .bind(cuisines)
        .fetch_one(self.db.pool())
        .await?;

        let restaurant = Self::row_to_restaurant(&row)?;
        debug!(restaurant_id = %restaurant.id, "Restaurant inserted");
        Ok(restaurant)
    }

    async fn update(
        &self,
        id: RestaurantId,
        changes: &Assignments,
    ) -> Result<Option<Restaurant>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE restaurants");
        push_assignments(&mut builder, changes)?;
        builder
            .push(" WHERE id = ")
            .push_bind(id.get())
            .push(format!(" RETURNING {COLUMNS}"));

        let row = builder.build().fetch_optional(self.db.pool()).await?;
        debug!(restaurant_id = %id, columns = changes.len(), updated = row.is_some(), "Restaurant update");
        row.as_ref().map(Self::row_to_restaurant).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish::NewDish;
    use crate::domain::restaurant::RestaurantPatch;
    use rust_decimal_macros::dec;

    async fn repo() -> SqliteRestaurantRepository {
        SqliteRestaurantRepository::new(Arc::new(Database::in_memory().await.unwrap()))
    }

    fn new_restaurant(name: &str, kosher: bool, cuisines: &[&str]) -> NewRestaurant {
        NewRestaurant::new(
            Some(name.to_string()),
            Some(kosher),
            Some(cuisines.iter().map(|c| (*c).to_string()).collect()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_returns_stored_row() {
        let repo = repo().await;
        let stored = repo
            .insert(&new_restaurant("Taizu", false, &["Asian", "Fusion"]))
            .await
            .unwrap();

        assert_eq!(stored.name, "Taizu");
        assert!(!stored.is_kosher);
        assert_eq!(stored.cuisines, vec!["Asian", "Fusion"]);
        assert!(repo.exists(stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn cuisine_filter_matches_whole_entries() {
        let repo = repo().await;
        repo.insert(&new_restaurant("Taizu", false, &["Asian"]))
            .await
            .unwrap();
        let pizza = repo
            .insert(&new_restaurant("Pizza Place", true, &["Italian", "Pizza"]))
            .await
            .unwrap();

        let italian = repo.find_by_cuisine("Italian").await.unwrap();
        assert_eq!(italian, vec![pizza]);
        assert!(repo.find_by_cuisine("Ital").await.unwrap().is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_by_id_embeds_dishes() {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let repo = SqliteRestaurantRepository::new(Arc::clone(&db));
        let dishes = SqliteDishRepository::new(db);

        let restaurant = repo
            .insert(&new_restaurant("Hummus Bar", true, &[]))
            .await
            .unwrap();
        let dish = NewDish::new(
            restaurant.id,
            Some("Hummus".to_string()),
            Some("Chickpeas".to_string()),
            Some(dec!(32)),
        )
        .unwrap();
        dishes.insert(&dish).await.unwrap();

        let detail = repo.find_by_id(restaurant.id).await.unwrap().unwrap();
        assert_eq!(detail.restaurant, restaurant);
        assert_eq!(detail.dishes.len(), 1);
        assert_eq!(detail.dishes[0].price, dec!(32.00));

        assert!(repo.find_by_id(RestaurantId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_changes_only_patched_columns() {
        let repo = repo().await;
        let stored = repo
            .insert(&new_restaurant("Taizu", false, &["Asian"]))
            .await
            .unwrap();

        let patch = RestaurantPatch {
            is_kosher: Some(true),
            ..RestaurantPatch::default()
        };
        let updated = repo
            .update(stored.id, &patch.into_assignments().unwrap())
            .await
            .unwrap()
            .unwrap();

        assert!(updated.is_kosher);
        assert_eq!(updated.name, "Taizu");
        assert_eq!(updated.cuisines, vec!["Asian"]);
    }

    #[tokio::test]
    async fn update_missing_restaurant_returns_none() {
        let repo = repo().await;
        let patch = RestaurantPatch {
            name: Some("Ghost".to_string()),
            ..RestaurantPatch::default()
        };
        let updated = repo
            .update(RestaurantId::new(42), &patch.into_assignments().unwrap())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
