//! Dishes: menu entries owned by exactly one restaurant.

pub mod model;
pub mod repository;

pub use model::{Dish, DishPatch, NewDish, PRICE_SCALE, normalize_price};
pub use repository::DishRepository;
