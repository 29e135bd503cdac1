//! Application Layer
//!
//! Use cases that coordinate several repositories or statements inside one
//! transaction. Single-entity reads and writes go straight from the HTTP
//! layer to the repositories.

pub mod use_cases;

pub use use_cases::*;
