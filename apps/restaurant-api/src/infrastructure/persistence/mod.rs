//! Persistence Adapters
//!
//! SQLite-backed implementations of the repository traits.
//!
//! [`Database`] wraps a `sqlx::SqlitePool` with foreign keys enforced on every
//! connection and creates the schema at startup. Each `Sqlite*Repository`
//! holds an `Arc<Database>`:
//!
//! | Type | Trait |
//! |------|-------|
//! | [`SqliteRestaurantRepository`] | `RestaurantRepository` |
//! | [`SqliteDishRepository`] | `DishRepository` |
//! | [`SqliteRatingRepository`] | `RatingRepository` |
//! | [`SqliteOrderRepository`] | `OrderRepository` |
//!
//! Decimals are stored as canonical TEXT and cuisine lists as JSON arrays.

mod database;
mod dish_repo;
mod error;
mod order_repo;
mod rating_repo;
mod restaurant_repo;
mod rows;
pub mod schema;

pub use database::{Database, SqlValue, UnitOfWork};
pub use dish_repo::SqliteDishRepository;
pub use order_repo::SqliteOrderRepository;
pub use rating_repo::SqliteRatingRepository;
pub use restaurant_repo::SqliteRestaurantRepository;
