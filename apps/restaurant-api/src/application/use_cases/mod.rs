//! Application Use Cases
//!
//! Multi-statement flows that must succeed or fail as a unit.

mod cascade_delete;
mod create_order;
#[cfg(test)]
mod fixtures;
mod transaction;

pub use cascade_delete::{CascadeDeleteUseCase, RemovedRows};
pub use create_order::CreateOrderUseCase;
