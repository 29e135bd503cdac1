//! HTTP/REST API adapter.
//!
//! Inbound adapter implementing REST endpoints over the repositories and the
//! transactional use cases.

mod controller;
mod request;
mod response;

pub use controller::{AppState, Repositories, create_router};
pub use request::*;
pub use response::*;
