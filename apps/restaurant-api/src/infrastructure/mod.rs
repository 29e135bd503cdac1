//! Infrastructure Layer
//!
//! Adapters around the domain and application layers:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: SQLite repositories and the transactional gateway
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod config;
pub mod http;
pub mod persistence;
