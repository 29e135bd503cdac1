//! Domain Layer
//!
//! Entities, validation and repository ports. Nothing here knows about
//! HTTP or SQL.

pub mod dish;
pub mod order;
pub mod rating;
pub mod restaurant;
pub mod shared;
