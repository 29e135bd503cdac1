//! HTTP request DTOs.
//!
//! Every body field is optional at the wire level so that a missing field is
//! reported by domain validation (`INVALID_INPUT` naming the field) rather
//! than by the JSON extractor.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::dish::{DishPatch, NewDish};
use crate::domain::order::{CreateOrderCommand, OrderLine};
use crate::domain::rating::{NewRating, RatingPatch};
use crate::domain::restaurant::{NewRestaurant, RestaurantPatch};
use crate::domain::shared::{DishId, DomainError, RestaurantId};

/// Body of `POST /restaurants`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    /// Display name.
    pub name: Option<String>,
    /// Kosher flag, `false` when absent.
    pub is_kosher: Option<bool>,
    /// Cuisines served.
    pub cuisines: Option<Vec<String>>,
}

impl CreateRestaurantRequest {
    /// Validate into a domain value.
    pub fn into_domain(self) -> Result<NewRestaurant, DomainError> {
        NewRestaurant::new(self.name, self.is_kosher, self.cuisines)
    }
}

/// Body of `PUT /restaurants/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    /// New name.
    pub name: Option<String>,
    /// New kosher flag.
    pub is_kosher: Option<bool>,
    /// Replacement cuisine list.
    pub cuisines: Option<Vec<String>>,
}

impl From<UpdateRestaurantRequest> for RestaurantPatch {
    fn from(request: UpdateRestaurantRequest) -> Self {
        Self {
            name: request.name,
            is_kosher: request.is_kosher,
            cuisines: request.cuisines,
        }
    }
}

/// Body of `POST /restaurants/{id}/dishes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDishRequest {
    /// Display name.
    pub name: Option<String>,
    /// Menu description.
    pub description: Option<String>,
    /// Price, as a JSON number or numeric string.
    pub price: Option<Decimal>,
}

impl CreateDishRequest {
    /// Validate into a domain value owned by `restaurant_id`.
    pub fn into_domain(self, restaurant_id: RestaurantId) -> Result<NewDish, DomainError> {
        NewDish::new(restaurant_id, self.name, self.description, self.price)
    }
}

/// Body of `PUT /restaurants/{id}/dishes/{dishId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDishRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
}

impl From<UpdateDishRequest> for DishPatch {
    fn from(request: UpdateDishRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
        }
    }
}

/// One line of an order request.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    /// Dish to order.
    pub dish_id: Option<DishId>,
    /// Quantity.
    pub amount: Option<i64>,
}

/// Body of `POST /order`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Restaurant to order from.
    pub restaurant_id: Option<RestaurantId>,
    /// Requested lines, in order.
    pub order_items: Option<Vec<OrderItemRequest>>,
}

impl CreateOrderRequest {
    /// Shape-check into a command. Store checks happen in the use case.
    pub fn into_command(self) -> Result<CreateOrderCommand, DomainError> {
        let lines = self
            .order_items
            .map(|items| {
                items
                    .into_iter()
                    .map(|item| OrderLine::new(item.dish_id, item.amount))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        CreateOrderCommand::new(self.restaurant_id, lines)
    }
}

/// Body of `POST /ratings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    /// Rated restaurant.
    pub restaurant_id: Option<RestaurantId>,
    /// Score in `[0, 10)`.
    pub rating: Option<Decimal>,
}

impl CreateRatingRequest {
    /// Validate into a domain value.
    pub fn into_domain(self) -> Result<NewRating, DomainError> {
        NewRating::new(self.restaurant_id, self.rating)
    }
}

/// Body of `PUT /ratings/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRatingRequest {
    /// New score.
    pub rating: Option<Decimal>,
}

impl From<UpdateRatingRequest> for RatingPatch {
    fn from(request: UpdateRatingRequest) -> Self {
        Self {
            rating: request.rating,
        }
    }
}

/// Query string of `GET /restaurants`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantQuery {
    /// Exact cuisine to filter by.
    pub cuisine: Option<String>,
}

/// Query string of `GET /ratings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingQuery {
    /// Only ratings of this restaurant.
    pub restaurant_id: Option<RestaurantId>,
}
