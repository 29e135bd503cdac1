//! Cascading Delete Use Case
//!
//! Removes a restaurant or a dish together with every row that references
//! it. Children are always deleted before their parents, and the whole
//! cascade is one transaction.

use std::sync::Arc;

use tracing::info;

use super::transaction::{abort, discard};
use crate::domain::shared::{DishId, RestaurantId, StoreError};
use crate::error::ServiceError;
use crate::infrastructure::persistence::{Database, UnitOfWork};

/// Rows removed by a cascade, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedRows {
    /// Order lines removed.
    pub order_items: u64,
    /// Dishes removed.
    pub dishes: u64,
    /// Ratings removed.
    pub ratings: u64,
    /// Order headers removed.
    pub orders: u64,
}

/// Use case for deleting restaurants and dishes with their dependents.
pub struct CascadeDeleteUseCase {
    db: Arc<Database>,
}

impl CascadeDeleteUseCase {
    /// Create a new `CascadeDeleteUseCase`.
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Delete a restaurant with its dishes, ratings, orders and order lines.
    ///
    /// Returns `false`, with nothing removed, when the restaurant does not
    /// exist.
    pub async fn delete_restaurant(&self, id: RestaurantId) -> Result<bool, ServiceError> {
        let mut uow = self.db.begin().await?;

        let outcome = Self::remove_restaurant(&mut uow, id).await;
        match outcome {
            Ok(Some(removed)) => {
                uow.commit().await?;
                info!(
                    restaurant_id = %id,
                    order_items = removed.order_items,
                    dishes = removed.dishes,
                    ratings = removed.ratings,
                    orders = removed.orders,
                    "Restaurant deleted"
                );
                Ok(true)
            }
            Ok(None) => {
                discard(uow, "delete_restaurant").await?;
                Ok(false)
            }
            Err(e) => {
                abort(uow, "delete_restaurant", &e).await;
                Err(e.into())
            }
        }
    }

    /// Delete a dish of `restaurant_id` with the order lines that reference it.
    ///
    /// Returns `false`, with nothing removed, when the dish does not exist
    /// under that restaurant.
    pub async fn delete_dish(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<bool, ServiceError> {
        let mut uow = self.db.begin().await?;

        let outcome = Self::remove_dish(&mut uow, dish_id, restaurant_id).await;
        match outcome {
            Ok(Some(order_items)) => {
                uow.commit().await?;
                info!(
                    dish_id = %dish_id,
                    restaurant_id = %restaurant_id,
                    order_items,
                    "Dish deleted"
                );
                Ok(true)
            }
            Ok(None) => {
                discard(uow, "delete_dish").await?;
                Ok(false)
            }
            Err(e) => {
                abort(uow, "delete_dish", &e).await;
                Err(e.into())
            }
        }
    }

    /// Statements of the restaurant cascade. `None` means the restaurant row
    /// was absent and the unit must be discarded.
    async fn remove_restaurant(
        uow: &mut UnitOfWork,
        id: RestaurantId,
    ) -> Result<Option<RemovedRows>, StoreError> {
        let mut removed = RemovedRows::default();

        // Lines ordering the restaurant's dishes
        let dish_ids = uow
            .fetch_integers("SELECT id FROM dishes WHERE restaurant_id = ?", &[id.into()])
            .await?;
        for dish_id in dish_ids {
            removed.order_items += uow
                .execute("DELETE FROM order_items WHERE dish_id = ?", &[dish_id.into()])
                .await?;
        }

        removed.dishes = uow
            .execute("DELETE FROM dishes WHERE restaurant_id = ?", &[id.into()])
            .await?;
        removed.ratings = uow
            .execute("DELETE FROM ratings WHERE restaurant_id = ?", &[id.into()])
            .await?;

        // Lines of the restaurant's orders. Normally already gone with the
        // dishes above.
        let order_ids = uow
            .fetch_texts("SELECT id FROM orders WHERE restaurant_id = ?", &[id.into()])
            .await?;
        for order_id in order_ids {
            removed.order_items += uow
                .execute("DELETE FROM order_items WHERE order_id = ?", &[order_id.into()])
                .await?;
        }

        removed.orders = uow
            .execute("DELETE FROM orders WHERE restaurant_id = ?", &[id.into()])
            .await?;

        let deleted = uow
            .execute("DELETE FROM restaurants WHERE id = ?", &[id.into()])
            .await?;
        Ok((deleted > 0).then_some(removed))
    }

    /// Statements of the dish cascade. Returns the number of order lines
    /// removed, or `None` when the scoped dish row was absent.
    async fn remove_dish(
        uow: &mut UnitOfWork,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<u64>, StoreError> {
        let order_items = uow
            .execute("DELETE FROM order_items WHERE dish_id = ?", &[dish_id.into()])
            .await?;

        let deleted = uow
            .execute(
                "DELETE FROM dishes WHERE id = ? AND restaurant_id = ?",
                &[dish_id.into(), restaurant_id.into()],
            )
            .await?;
        Ok((deleted > 0).then_some(order_items))
    }
}
