//! Dependency Injection Container
//!
//! Wires the SQLite adapters, the use cases and the HTTP state around one
//! shared [`Database`].

use std::sync::Arc;

use crate::application::use_cases::{CascadeDeleteUseCase, CreateOrderUseCase};
use crate::infrastructure::http::{AppState, Repositories};
use crate::infrastructure::persistence::{
    Database, SqliteDishRepository, SqliteOrderRepository, SqliteRatingRepository,
    SqliteRestaurantRepository,
};

/// The production adapter set.
#[derive(Debug, Clone, Copy)]
pub struct SqliteRepositories;

impl Repositories for SqliteRepositories {
    type Restaurants = SqliteRestaurantRepository;
    type Dishes = SqliteDishRepository;
    type Ratings = SqliteRatingRepository;
    type Orders = SqliteOrderRepository;
}

/// Dependency injection container.
///
/// Every repository and use case shares the same gateway, so the process
/// holds exactly one pool.
pub struct Container {
    db: Arc<Database>,
    restaurant_repo: Arc<SqliteRestaurantRepository>,
    dish_repo: Arc<SqliteDishRepository>,
    rating_repo: Arc<SqliteRatingRepository>,
    order_repo: Arc<SqliteOrderRepository>,
}

impl Container {
    /// Build all repositories over `db`.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            restaurant_repo: Arc::new(SqliteRestaurantRepository::new(Arc::clone(&db))),
            dish_repo: Arc::new(SqliteDishRepository::new(Arc::clone(&db))),
            rating_repo: Arc::new(SqliteRatingRepository::new(Arc::clone(&db))),
            order_repo: Arc::new(SqliteOrderRepository::new(Arc::clone(&db))),
            db,
        }
    }

    /// Get the shared gateway.
    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    /// Create a `CreateOrderUseCase`.
    pub fn create_order_use_case(
        &self,
    ) -> CreateOrderUseCase<SqliteRestaurantRepository, SqliteDishRepository> {
        CreateOrderUseCase::new(
            Arc::clone(&self.restaurant_repo),
            Arc::clone(&self.dish_repo),
            Arc::clone(&self.db),
        )
    }

    /// Create a `CascadeDeleteUseCase`.
    pub fn cascade_delete_use_case(&self) -> CascadeDeleteUseCase {
        CascadeDeleteUseCase::new(Arc::clone(&self.db))
    }

    /// Assemble the HTTP handler state.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<SqliteRepositories> {
        AppState {
            restaurant_repo: Arc::clone(&self.restaurant_repo),
            dish_repo: Arc::clone(&self.dish_repo),
            rating_repo: Arc::clone(&self.rating_repo),
            order_repo: Arc::clone(&self.order_repo),
            create_order: Arc::new(self.create_order_use_case()),
            cascade_delete: Arc::new(self.cascade_delete_use_case()),
            version: version.into(),
        }
    }
}

/// Shorthand for `Container::new(db).app_state(version)`.
pub fn build_app_state(db: Arc<Database>, version: impl Into<String>) -> AppState<SqliteRepositories> {
    Container::new(db).app_state(version)
}
