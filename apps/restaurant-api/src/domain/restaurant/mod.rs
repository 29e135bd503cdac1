//! Restaurants: the root of every other entity.

pub mod model;
pub mod repository;

pub use model::{NewRestaurant, Restaurant, RestaurantDetail, RestaurantPatch};
pub use repository::RestaurantRepository;
