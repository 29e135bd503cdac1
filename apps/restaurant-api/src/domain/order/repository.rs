//! Order Repository Trait
//!
//! Read-back only. Orders are written exclusively by the order creation use
//! case inside a single transaction.

use async_trait::async_trait;

use super::model::Order;
use crate::domain::shared::{OrderId, StoreError};

/// Repository trait for reading placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// An order header and its items, or `None` when absent.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
}
