//! SQLite adapter for [`OrderRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use tracing::debug;

use super::database::Database;
use super::rows::column;
use crate::domain::order::{Order, OrderItem, OrderRepository};
use crate::domain::shared::{DishId, OrderId, OrderItemId, RestaurantId, StoreError};

/// Orders read back from the `orders` and `order_items` tables.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    db: Arc<Database>,
}

impl SqliteOrderRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_item(row: &SqliteRow, order_id: OrderId) -> Result<OrderItem, StoreError> {
        Ok(OrderItem {
            id: OrderItemId::new(column(row, "id")?),
            order_id,
            dish_id: DishId::new(column(row, "dish_id")?),
            amount: column(row, "amount")?,
        })
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query("SELECT restaurant_id, created_at FROM orders WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let restaurant_id = RestaurantId::new(column(&row, "restaurant_id")?);
        let created_at: DateTime<Utc> = column(&row, "created_at")?;

        let item_rows = sqlx::query(
            "SELECT id, dish_id, amount FROM order_items WHERE order_id = ? ORDER BY id",
        )
        .bind(id.to_string())
        .fetch_all(self.db.pool())
        .await?;

        let items = item_rows
            .iter()
            .map(|r| Self::row_to_item(r, id))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(order_id = %id, items = items.len(), "Loaded order");
        Ok(Some(Order {
            id,
            restaurant_id,
            created_at,
            items,
        }))
    }
}
