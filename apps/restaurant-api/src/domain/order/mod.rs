//! Orders and their lines.

pub mod model;
pub mod repository;

pub use model::{CreateOrderCommand, Order, OrderItem, OrderLine};
pub use repository::OrderRepository;
