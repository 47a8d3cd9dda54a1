//! dockscope-api library - container runtime introspection over HTTP
//!
//! Read-only views of containers, images, volumes, networks, stats and logs,
//! each gated by a single shared secret passed as `?key=`.

use std::sync::Arc;

use axum::Router;
use dockscope_common::api::SharedSecret;
use dockscope_common::RuntimeInspector;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Container runtime collaborator
    pub inspector: Arc<dyn RuntimeInspector>,
    /// API key generated at startup; read-only afterwards
    pub shared_secret: Arc<SharedSecret>,
}

impl AppState {
    /// Create new application state
    pub fn new(inspector: Arc<dyn RuntimeInspector>, shared_secret: SharedSecret) -> Self {
        Self {
            inspector,
            shared_secret: Arc::new(shared_secret),
        }
    }
}

/// Version and build id for the startup log line
pub fn build_info() -> String {
    format!(
        "v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}

/// Build application router
///
/// Every endpoint is served both at the root (`/containers`) and under
/// `/api` (`/api/containers`). Resource endpoints sit behind the key check;
/// `/status` does not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;

    let routes = Router::new()
        .merge(api::resource_routes(state.clone()))
        .merge(api::status_routes());

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(middleware::from_fn(api::log_requests))
        .with_state(state)
}
