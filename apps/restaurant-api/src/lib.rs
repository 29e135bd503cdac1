// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Restaurant API - Rust Core Library
//!
//! REST service for restaurants, their dishes, orders and ratings, backed by
//! SQLite.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: entities, validation and repository traits
//!   - `restaurant`, `dish`, `order`, `rating`
//!   - `shared`: identifiers, partial-update assignments, error types
//!
//! - **Application**: transactional use cases
//!   - `CreateOrder`: restaurant and dish checks, then header + lines atomically
//!   - `CascadeDelete`: restaurant or dish with every dependent row
//!
//! - **Infrastructure**: adapters
//!   - `persistence`: SQLite gateway and repositories (`sqlx`)
//!   - `http`: REST controllers (`axum`)
//!   - `config`: dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no I/O.
pub mod domain;

/// Application layer - Use cases spanning several repositories.
pub mod application;

/// Infrastructure layer - Adapters and wiring.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Service error taxonomy and HTTP mapping.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::use_cases::{CascadeDeleteUseCase, CreateOrderUseCase, RemovedRows};
pub use config::{Config, ConfigError, load_config, load_process_config};
pub use error::{ErrorCode, HttpErrorResponse, ServiceError};
pub use infrastructure::config::{Container, SqliteRepositories, build_app_state};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::Database;
