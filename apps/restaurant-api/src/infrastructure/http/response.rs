//! HTTP response DTOs and the error response adapter.

use axum::Json;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::dish::Dish;
use crate::domain::order::{Order, OrderItem};
use crate::domain::rating::Rating;
use crate::domain::restaurant::{Restaurant, RestaurantDetail};
use crate::domain::shared::{
    DishId, DomainError, OrderId, OrderItemId, RatingId, RestaurantId, StoreError,
};
use crate::error::ServiceError;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// A restaurant as returned by list, create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    /// Row id.
    pub id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Kosher flag.
    pub is_kosher: bool,
    /// Cuisines served.
    pub cuisines: Vec<String>,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            is_kosher: restaurant.is_kosher,
            cuisines: restaurant.cuisines,
        }
    }
}

/// A dish as embedded in a restaurant read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDishResponse {
    /// Row id.
    pub id: DishId,
    /// Display name.
    pub name: String,
    /// Menu description.
    pub description: String,
    /// Price, serialized as a string with two fractional digits.
    pub price: Decimal,
}

impl From<Dish> for MenuDishResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            price: dish.price,
        }
    }
}

/// `GET /restaurants/{id}`: the restaurant with its menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDetailResponse {
    /// Restaurant fields.
    #[serde(flatten)]
    pub restaurant: RestaurantResponse,
    /// Menu, ordered by dish id.
    pub dishes: Vec<MenuDishResponse>,
}

impl From<RestaurantDetail> for RestaurantDetailResponse {
    fn from(detail: RestaurantDetail) -> Self {
        Self {
            restaurant: detail.restaurant.into(),
            dishes: detail.dishes.into_iter().map(Into::into).collect(),
        }
    }
}

/// A dish with its owning restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishResponse {
    /// Row id.
    pub id: DishId,
    /// Owning restaurant.
    pub restaurant_id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Menu description.
    pub description: String,
    /// Price.
    pub price: Decimal,
}

impl From<Dish> for DishResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            restaurant_id: dish.restaurant_id,
            name: dish.name,
            description: dish.description,
            price: dish.price,
        }
    }
}

/// `POST /order` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    /// Id of the new order.
    pub order_id: OrderId,
}

/// One line of an order read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    /// Row id.
    pub id: OrderItemId,
    /// Ordered dish.
    pub dish_id: DishId,
    /// Quantity.
    pub amount: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            dish_id: item.dish_id,
            amount: item.amount,
        }
    }
}

/// `GET /order/{orderId}`: the header with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Order id.
    pub id: OrderId,
    /// Restaurant ordered from.
    pub restaurant_id: RestaurantId,
    /// Server time at insert, RFC 3339.
    pub created_at: DateTime<Utc>,
    /// Lines in insertion order.
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            restaurant_id: order.restaurant_id,
            created_at: order.created_at,
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// A rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    /// Row id.
    pub id: RatingId,
    /// Rated restaurant.
    pub restaurant_id: RestaurantId,
    /// Score with one fractional digit.
    pub rating: Decimal,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            restaurant_id: rating.restaurant_id,
            rating: rating.rating,
        }
    }
}

// ============================================================================
// Error Response
// ============================================================================

/// Handler error, rendered as `{ code, message, details }`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    /// The wrapped service error.
    #[must_use]
    pub const fn inner(&self) -> &ServiceError {
        &self.0
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.code().http_status();
        if status.is_server_error() {
            error!(code = %self.0.code(), error = %self.0, "Request failed");
        } else {
            debug!(code = %self.0.code(), error = %self.0, "Request rejected");
        }
        (status, Json(self.0.to_http_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    #[test]
    fn decimals_serialize_as_fixed_scale_strings() {
        let rating = RatingResponse {
            id: RatingId::new(1),
            restaurant_id: RestaurantId::new(2),
            rating: dec!(4.0),
        };
        let json = serde_json::to_value(&rating).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "restaurantId": 2, "rating": "4.0"})
        );
    }

    #[test]
    fn detail_flattens_restaurant_fields() {
        let detail = RestaurantDetailResponse {
            restaurant: RestaurantResponse {
                id: RestaurantId::new(3),
                name: "Taizu".to_string(),
                is_kosher: false,
                cuisines: vec!["Asian".to_string()],
            },
            dishes: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["isKosher"], false);
        assert_eq!(json["dishes"], serde_json::json!([]));
    }

    #[test]
    fn api_error_uses_code_status() {
        let response = ApiError(ServiceError::dish_not_found(99)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from(DomainError::missing("name")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
