//! Shared kernel: identifiers, validation errors and partial-update plumbing.

pub mod errors;
pub mod identifiers;
pub mod patch;
pub mod validation;

pub use errors::{DomainError, StoreError};
pub use identifiers::{DishId, OrderId, OrderItemId, RatingId, RestaurantId};
pub use patch::{Assignment, Assignments, AssignmentsBuilder, FieldValue};
