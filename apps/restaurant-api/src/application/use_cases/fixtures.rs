//! Seed data for use-case tests.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::dish::{Dish, DishRepository, NewDish};
use crate::domain::rating::{NewRating, RatingRepository};
use crate::domain::restaurant::{NewRestaurant, Restaurant, RestaurantRepository};
use crate::domain::shared::RestaurantId;
use crate::infrastructure::persistence::{
    Database, SqlValue, SqliteDishRepository, SqliteRatingRepository, SqliteRestaurantRepository,
};

pub(crate) struct Fixture {
    pub db: Arc<Database>,
    pub restaurants: Arc<SqliteRestaurantRepository>,
    pub dishes: Arc<SqliteDishRepository>,
    pub ratings: Arc<SqliteRatingRepository>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_database(Database::in_memory().await.unwrap())
    }

    /// Seed through an already opened database with its schema in place.
    pub fn with_database(db: Database) -> Self {
        let db = Arc::new(db);
        Self {
            restaurants: Arc::new(SqliteRestaurantRepository::new(Arc::clone(&db))),
            dishes: Arc::new(SqliteDishRepository::new(Arc::clone(&db))),
            ratings: Arc::new(SqliteRatingRepository::new(Arc::clone(&db))),
            db,
        }
    }

    pub async fn restaurant(&self, name: &str) -> Restaurant {
        let new = NewRestaurant::new(Some(name.to_string()), None, Some(vec![])).unwrap();
        self.restaurants.insert(&new).await.unwrap()
    }

    pub async fn dish(&self, restaurant_id: RestaurantId, name: &str, price: Decimal) -> Dish {
        let new = NewDish::new(
            restaurant_id,
            Some(name.to_string()),
            Some(format!("{name} of the house")),
            Some(price),
        )
        .unwrap();
        self.dishes.insert(&new).await.unwrap()
    }

    pub async fn rating(&self, restaurant_id: RestaurantId, score: Decimal) {
        let new = NewRating::new(Some(restaurant_id), Some(score)).unwrap();
        self.ratings.insert(&new).await.unwrap();
    }

    /// Row count of `table`, optionally filtered by `column = value`.
    pub async fn count(&self, table: &str, filter: Option<(&str, SqlValue)>) -> i64 {
        match filter {
            Some((column, value)) => self
                .db
                .count(
                    &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?"),
                    &[value],
                )
                .await
                .unwrap(),
            None => self
                .db
                .count(&format!("SELECT COUNT(*) FROM {table}"), &[])
                .await
                .unwrap(),
        }
    }

    /// Make every insert of an order line with this amount fail.
    pub async fn fail_order_items_with_amount(&self, amount: i64) {
        self.db
            .execute(
                &format!(
                    "CREATE TRIGGER fail_order_item BEFORE INSERT ON order_items \
                     WHEN NEW.amount = {amount} BEGIN SELECT RAISE(ABORT, 'injected failure'); END"
                ),
                &[],
            )
            .await
            .unwrap();
    }

    /// Let the statements of an order succeed but make its commit fail: every
    /// new order writes an audit row whose foreign key is only checked at
    /// commit.
    pub async fn fail_commit_after_order_insert(&self) {
        self.fail_commit_after("INSERT ON orders").await;
    }

    /// Same as [`Self::fail_commit_after_order_insert`], for deletes from
    /// `table`.
    pub async fn fail_commit_after_delete_on(&self, table: &str) {
        self.fail_commit_after(&format!("DELETE ON {table}")).await;
    }

    async fn fail_commit_after(&self, event: &str) {
        for statement in [
            "CREATE TABLE IF NOT EXISTS audit (restaurant_id INTEGER REFERENCES restaurants (id) \
             DEFERRABLE INITIALLY DEFERRED)"
                .to_string(),
            format!(
                "CREATE TRIGGER audit_{} AFTER {event} \
                 BEGIN INSERT INTO audit (restaurant_id) VALUES (-1); END",
                event.replace(' ', "_").to_lowercase()
            ),
        ] {
            self.db.execute(&statement, &[]).await.unwrap();
        }
    }

    /// Make every delete from `table` fail.
    pub async fn fail_deletes_on(&self, table: &str) {
        self.db
            .execute(
                &format!(
                    "CREATE TRIGGER fail_delete_{table} BEFORE DELETE ON {table} \
                     BEGIN SELECT RAISE(ABORT, 'injected failure'); END"
                ),
                &[],
            )
            .await
            .unwrap();
    }
}
