//! API routes.

pub mod data;
pub mod health;

pub use data::data_handler;
pub use health::{HealthResponse, health_routes};
