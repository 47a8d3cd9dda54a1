//! Resource endpoints
//!
//! Each handler runs behind [`auth_middleware`], makes one collaborator call
//! and returns the result verbatim in a success envelope. Collaborator
//! failures become a 502 `RUNTIME_ERROR` envelope.

use axum::{extract::State, middleware, routing::any, Router};
use dockscope_common::runtime::{
    ContainerInfo, ContainerLogs, ContainerStats, ImageInfo, NetworkInfo, VolumeInfo,
};

use super::auth::auth_middleware;
use super::response::{success, ApiResult};
use crate::AppState;

/// GET /containers
pub async fn list_containers(State(state): State<AppState>) -> ApiResult<Vec<ContainerInfo>> {
    let containers = state.inspector.list_containers().await?;
    Ok(success(containers))
}

/// GET /images
pub async fn list_images(State(state): State<AppState>) -> ApiResult<Vec<ImageInfo>> {
    let images = state.inspector.list_images().await?;
    Ok(success(images))
}

/// GET /volumes
pub async fn list_volumes(State(state): State<AppState>) -> ApiResult<Vec<VolumeInfo>> {
    let volumes = state.inspector.list_volumes().await?;
    Ok(success(volumes))
}

/// GET /networks
pub async fn list_networks(State(state): State<AppState>) -> ApiResult<Vec<NetworkInfo>> {
    let networks = state.inspector.list_networks().await?;
    Ok(success(networks))
}

/// GET /stats
pub async fn container_stats(State(state): State<AppState>) -> ApiResult<Vec<ContainerStats>> {
    let stats = state.inspector.fetch_stats().await?;
    Ok(success(stats))
}

/// GET /logs
///
/// Two collaborator stages: the container listing, then logs for that
/// listing. Either failing ends the request.
pub async fn container_logs(State(state): State<AppState>) -> ApiResult<Vec<ContainerLogs>> {
    let containers = state.inspector.list_containers().await?;
    let logs = state.inspector.fetch_logs(&containers).await?;
    Ok(success(logs))
}

/// Build protected resource routes
///
/// Routed with `any` so the middleware, not the router, rejects non-GET
/// methods with the 405 envelope.
pub fn resource_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/containers", any(list_containers))
        .route("/images", any(list_images))
        .route("/volumes", any(list_volumes))
        .route("/networks", any(list_networks))
        .route("/stats", any(container_stats))
        .route("/logs", any(container_logs))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
