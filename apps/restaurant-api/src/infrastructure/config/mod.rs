//! Dependency wiring.

mod container;

pub use container::{Container, SqliteRepositories, build_app_state};
