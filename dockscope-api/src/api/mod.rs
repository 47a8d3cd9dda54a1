//! HTTP API handlers for dockscope

pub mod auth;
pub mod health;
pub mod logging;
pub mod resources;
pub mod response;

pub use auth::{auth_middleware, authorize, require_get};
pub use health::{status, status_routes};
pub use logging::log_requests;
pub use resources::{
    container_logs, container_stats, list_containers, list_images, list_networks, list_volumes,
    resource_routes,
};
pub use response::{success, ApiError, ApiResult, FailureNote};
