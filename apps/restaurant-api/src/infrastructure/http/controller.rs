//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API. Reads and single-row writes go straight to the
//! repositories; order creation and deletes go through the transactional
//! use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::use_cases::{CascadeDeleteUseCase, CreateOrderUseCase};
use crate::domain::dish::{DishPatch, DishRepository};
use crate::domain::order::OrderRepository;
use crate::domain::rating::{RatingPatch, RatingRepository};
use crate::domain::restaurant::{RestaurantPatch, RestaurantRepository};
use crate::domain::shared::{DishId, OrderId, RatingId, RestaurantId};
use crate::error::{ErrorCode, ServiceError};

use super::request::{
    CreateDishRequest, CreateOrderRequest, CreateRatingRequest, CreateRestaurantRequest,
    RatingQuery, RestaurantQuery, UpdateDishRequest, UpdateRatingRequest, UpdateRestaurantRequest,
};
use super::response::{
    ApiError, DishResponse, HealthResponse, OrderCreatedResponse, OrderResponse, RatingResponse,
    RestaurantDetailResponse, RestaurantResponse,
};

/// The repository adapters a server is wired with.
pub trait Repositories: Send + Sync + 'static {
    /// Restaurant storage.
    type Restaurants: RestaurantRepository + 'static;
    /// Dish storage.
    type Dishes: DishRepository + 'static;
    /// Rating storage.
    type Ratings: RatingRepository + 'static;
    /// Order read-back.
    type Orders: OrderRepository + 'static;
}

/// Application state shared across handlers.
pub struct AppState<S: Repositories> {
    /// Restaurant repository.
    pub restaurant_repo: Arc<S::Restaurants>,
    /// Dish repository.
    pub dish_repo: Arc<S::Dishes>,
    /// Rating repository.
    pub rating_repo: Arc<S::Ratings>,
    /// Order repository for reads.
    pub order_repo: Arc<S::Orders>,
    /// Use case for placing orders.
    pub create_order: Arc<CreateOrderUseCase<S::Restaurants, S::Dishes>>,
    /// Use case for cascading deletes.
    pub cascade_delete: Arc<CascadeDeleteUseCase>,
    /// Application version.
    pub version: String,
}

impl<S: Repositories> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            restaurant_repo: Arc::clone(&self.restaurant_repo),
            dish_repo: Arc::clone(&self.dish_repo),
            rating_repo: Arc::clone(&self.rating_repo),
            order_repo: Arc::clone(&self.order_repo),
            create_order: Arc::clone(&self.create_order),
            cascade_delete: Arc::clone(&self.cascade_delete),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S: Repositories>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/restaurants",
            get(list_restaurants).post(create_restaurant),
        )
        .route(
            "/restaurants/{id}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route(
            "/restaurants/{id}/dishes",
            get(list_dishes).post(create_dish),
        )
        .route(
            "/restaurants/{id}/dishes/{dish_id}",
            get(get_dish).put(update_dish).delete(delete_dish),
        )
        .route("/order", post(create_order))
        .route("/order/{order_id}", get(get_order))
        .route("/ratings", get(list_ratings).post(create_rating))
        .route("/ratings/{id}", get(get_rating).put(update_rating))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<S: Repositories>(State(state): State<AppState<S>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

// ============================================================================
// Restaurants
// ============================================================================

/// List restaurants, optionally only those serving `cuisine`.
///
/// An empty cuisine match is a 404, a plain empty list is not. A blank
/// `cuisine` parameter is treated as absent.
async fn list_restaurants<S: Repositories>(
    State(state): State<AppState<S>>,
    Query(query): Query<RestaurantQuery>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let restaurants = match query.cuisine.filter(|c| !c.is_empty()) {
        Some(cuisine) => {
            let found = state.restaurant_repo.find_by_cuisine(&cuisine).await?;
            if found.is_empty() {
                return Err(ServiceError::new(
                    ErrorCode::RestaurantNotFound,
                    format!("No restaurants found with cuisine '{cuisine}'"),
                )
                .with_context("cuisine", cuisine)
                .into());
            }
            found
        }
        None => state.restaurant_repo.find_all().await?,
    };

    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

async fn get_restaurant<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RestaurantId>,
) -> Result<Json<RestaurantDetailResponse>, ApiError> {
    let detail = state
        .restaurant_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::restaurant_not_found(id))?;
    Ok(Json(detail.into()))
}

async fn create_restaurant<S: Repositories>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    let new = request.into_domain()?;
    let restaurant = state.restaurant_repo.insert(&new).await?;
    info!(restaurant_id = %restaurant.id, "Restaurant created");
    Ok((StatusCode::CREATED, Json(restaurant.into())))
}

async fn update_restaurant<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RestaurantId>,
    Json(request): Json<UpdateRestaurantRequest>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let changes = RestaurantPatch::from(request).into_assignments()?;
    let restaurant = state
        .restaurant_repo
        .update(id, &changes)
        .await?
        .ok_or_else(|| ServiceError::restaurant_not_found(id))?;
    Ok(Json(restaurant.into()))
}

async fn delete_restaurant<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RestaurantId>,
) -> Result<StatusCode, ApiError> {
    if state.cascade_delete.delete_restaurant(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::restaurant_not_found(id).into())
    }
}

// ============================================================================
// Dishes
// ============================================================================

async fn list_dishes<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RestaurantId>,
) -> Result<Json<Vec<DishResponse>>, ApiError> {
    let dishes = state.dish_repo.find_by_restaurant(id).await?;
    Ok(Json(dishes.into_iter().map(Into::into).collect()))
}

async fn get_dish<S: Repositories>(
    State(state): State<AppState<S>>,
    Path((id, dish_id)): Path<(RestaurantId, DishId)>,
) -> Result<Json<DishResponse>, ApiError> {
    let dish = state
        .dish_repo
        .find_scoped(dish_id, id)
        .await?
        .ok_or_else(|| dish_not_found(dish_id, id))?;
    Ok(Json(dish.into()))
}

/// Add a dish. The restaurant is checked first so that a missing parent is
/// a 404 rather than an integrity failure.
async fn create_dish<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RestaurantId>,
    Json(request): Json<CreateDishRequest>,
) -> Result<(StatusCode, Json<DishResponse>), ApiError> {
    let new = request.into_domain(id)?;
    if !state.restaurant_repo.exists(id).await? {
        return Err(ServiceError::restaurant_not_found(id).into());
    }
    let dish = state.dish_repo.insert(&new).await?;
    info!(dish_id = %dish.id, restaurant_id = %id, "Dish created");
    Ok((StatusCode::CREATED, Json(dish.into())))
}

async fn update_dish<S: Repositories>(
    State(state): State<AppState<S>>,
    Path((id, dish_id)): Path<(RestaurantId, DishId)>,
    Json(request): Json<UpdateDishRequest>,
) -> Result<Json<DishResponse>, ApiError> {
    let changes = DishPatch::from(request).into_assignments()?;
    let dish = state
        .dish_repo
        .update(dish_id, id, &changes)
        .await?
        .ok_or_else(|| dish_not_found(dish_id, id))?;
    Ok(Json(dish.into()))
}

async fn delete_dish<S: Repositories>(
    State(state): State<AppState<S>>,
    Path((id, dish_id)): Path<(RestaurantId, DishId)>,
) -> Result<StatusCode, ApiError> {
    if state.cascade_delete.delete_dish(dish_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(dish_not_found(dish_id, id).into())
    }
}

fn dish_not_found(dish_id: DishId, restaurant_id: RestaurantId) -> ServiceError {
    ServiceError::dish_not_found(dish_id).with_context("restaurant_id", restaurant_id.to_string())
}

// ============================================================================
// Orders
// ============================================================================

async fn create_order<S: Repositories>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<OrderCreatedResponse>, ApiError> {
    let command = request.into_command()?;
    let order_id = state.create_order.execute(&command).await?;
    Ok(Json(OrderCreatedResponse { order_id }))
}

/// Read an order back. An id that is not a UUID is rejected as input.
async fn get_order<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = raw_id.parse().map_err(|_| {
        ServiceError::invalid_input(format!("'{raw_id}' is not a valid order id"))
            .with_context("field", "orderId")
    })?;
    let order = state
        .order_repo
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| ServiceError::order_not_found(order_id))?;
    Ok(Json(order.into()))
}

// ============================================================================
// Ratings
// ============================================================================

async fn create_rating<S: Repositories>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateRatingRequest>,
) -> Result<Json<RatingResponse>, ApiError> {
    let new = request.into_domain()?;
    if !state.restaurant_repo.exists(new.restaurant_id()).await? {
        return Err(ServiceError::restaurant_not_found(new.restaurant_id()).into());
    }
    let rating = state.rating_repo.insert(&new).await?;
    info!(rating_id = %rating.id, restaurant_id = %rating.restaurant_id, "Rating added");
    Ok(Json(rating.into()))
}

async fn list_ratings<S: Repositories>(
    State(state): State<AppState<S>>,
    Query(query): Query<RatingQuery>,
) -> Result<Json<Vec<RatingResponse>>, ApiError> {
    let ratings = match query.restaurant_id {
        Some(restaurant_id) => state.rating_repo.find_by_restaurant(restaurant_id).await?,
        None => state.rating_repo.find_all().await?,
    };
    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}

async fn get_rating<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RatingId>,
) -> Result<Json<RatingResponse>, ApiError> {
    let rating = state
        .rating_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::rating_not_found(id))?;
    Ok(Json(rating.into()))
}

async fn update_rating<S: Repositories>(
    State(state): State<AppState<S>>,
    Path(id): Path<RatingId>,
    Json(request): Json<UpdateRatingRequest>,
) -> Result<Json<RatingResponse>, ApiError> {
    let changes = RatingPatch::from(request).into_assignments()?;
    let rating = state
        .rating_repo
        .update(id, &changes)
        .await?
        .ok_or_else(|| ServiceError::rating_not_found(id))?;
    Ok(Json(rating.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::build_app_state;
    use crate::infrastructure::persistence::Database;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = Arc::new(Database::in_memory().await.unwrap());
        create_router(build_app_state(db, "test"))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "test");
    }

    #[tokio::test]
    async fn test_create_restaurant_requires_name() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/restaurants",
            Some(json!({"isKosher": true, "cuisines": []})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"]["field"], "name");
    }

    #[tokio::test]
    async fn test_cuisine_filter_without_match_is_not_found() {
        let app = app().await;
        let (status, _) = send(
            &app,
            "POST",
            "/restaurants",
            Some(json!({"name": "Taizu", "cuisines": ["Asian"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/restaurants?cuisine=Asian", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "GET", "/restaurants?cuisine=Greek", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "RESTAURANT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let app = app().await;
        send(
            &app,
            "POST",
            "/restaurants",
            Some(json!({"name": "Taizu", "cuisines": []})),
        )
        .await;

        let (status, body) = send(&app, "PUT", "/restaurants/1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "no fields to update");
    }

    #[tokio::test]
    async fn test_malformed_order_id_is_bad_request() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/order/not-a-uuid", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "orderId");
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let app = app().await;
        let uri = format!("/order/{}", OrderId::generate());
        let (status, body) = send(&app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ORDER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_rating_for_missing_restaurant_is_not_found() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/ratings",
            Some(json!({"restaurantId": 9, "rating": 4.5})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"]["restaurant_id"], "9");
    }
}
