//! Orders: an immutable header plus the lines placed with it.

use chrono::{DateTime, Utc};

use crate::domain::shared::{DishId, DomainError, OrderId, OrderItemId, RestaurantId};

/// A persisted order with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Service-generated id.
    pub id: OrderId,
    /// Restaurant the order was placed with.
    pub restaurant_id: RestaurantId,
    /// Server time at insert.
    pub created_at: DateTime<Utc>,
    /// Lines in insertion order.
    pub items: Vec<OrderItem>,
}

/// A persisted order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    /// Row id.
    pub id: OrderItemId,
    /// Parent order.
    pub order_id: OrderId,
    /// Ordered dish.
    pub dish_id: DishId,
    /// Quantity, always positive.
    pub amount: i64,
}

/// One requested `(dish, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    dish_id: DishId,
    amount: i64,
}

impl OrderLine {
    /// Validate one requested line.
    pub fn new(dish_id: Option<DishId>, amount: Option<i64>) -> Result<Self, DomainError> {
        let dish_id = dish_id.ok_or_else(|| DomainError::missing("dishId"))?;
        let amount = amount.ok_or_else(|| DomainError::missing("amount"))?;
        if amount <= 0 {
            return Err(DomainError::invalid("amount", "must be a positive integer"));
        }
        Ok(Self { dish_id, amount })
    }

    /// Requested dish.
    #[must_use]
    pub const fn dish_id(&self) -> DishId {
        self.dish_id
    }

    /// Requested quantity.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }
}

/// A shape-checked request to place an order.
///
/// Referential checks (restaurant exists, dishes belong to it) happen in the
/// use case, against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderCommand {
    restaurant_id: RestaurantId,
    lines: Vec<OrderLine>,
}

impl CreateOrderCommand {
    /// Validate the request shape: a restaurant and at least one line.
    pub fn new(
        restaurant_id: Option<RestaurantId>,
        lines: Option<Vec<OrderLine>>,
    ) -> Result<Self, DomainError> {
        let restaurant_id = restaurant_id.ok_or_else(|| DomainError::missing("restaurantId"))?;
        let lines = lines.ok_or_else(|| DomainError::missing("orderItems"))?;
        if lines.is_empty() {
            return Err(DomainError::invalid(
                "orderItems",
                "must contain at least one item",
            ));
        }
        Ok(Self {
            restaurant_id,
            lines,
        })
    }

    /// Target restaurant.
    #[must_use]
    pub const fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Requested lines, in request order.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }
}
