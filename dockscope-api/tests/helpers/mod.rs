//! Shared test helpers for dockscope-api integration tests
//!
//! Provides a scripted [`RuntimeInspector`] and request/response utilities.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use dockscope_api::{build_router, AppState};
use dockscope_common::api::SharedSecret;
use dockscope_common::runtime::{
    ContainerInfo, ContainerLogs, ContainerStats, ImageInfo, NetworkInfo, PortMapping, VolumeInfo,
};
use dockscope_common::{Error, Result, RuntimeInspector};
use serde_json::Value;

/// 32-character secret used by every test app
pub const TEST_SECRET: &str = "s3cr3tABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Every resource route, without prefix
pub const RESOURCE_PATHS: [&str; 6] = [
    "/containers",
    "/images",
    "/volumes",
    "/networks",
    "/stats",
    "/logs",
];

/// Collaborator call that should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Containers,
    Images,
    Volumes,
    Networks,
    Stats,
    Logs,
}

/// Scripted runtime: fixed payloads, optional failing stage, call counter
#[derive(Default)]
pub struct FakeInspector {
    pub failing: Option<Stage>,
    pub calls: AtomicUsize,
}

impl FakeInspector {
    pub fn failing_at(stage: Stage) -> Self {
        Self {
            failing: Some(stage),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, stage: Stage) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(stage) {
            return Err(Error::Runtime(format!("{:?} backend unavailable", stage)));
        }
        Ok(())
    }
}

pub fn sample_containers() -> Vec<ContainerInfo> {
    vec![ContainerInfo {
        id: "abc123".to_string(),
        name: "web".to_string(),
        image: "nginx:1.25".to_string(),
        command: "nginx -g 'daemon off;'".to_string(),
        created: 1_700_000_000,
        state: "running".to_string(),
        status: "Up 3 hours".to_string(),
        ports: vec![PortMapping {
            ip: Some("0.0.0.0".to_string()),
            private_port: 80,
            public_port: Some(8081),
            protocol: Some("tcp".to_string()),
        }],
    }]
}

pub fn sample_images() -> Vec<ImageInfo> {
    vec![ImageInfo {
        id: "sha256:feed".to_string(),
        tags: vec!["nginx:1.25".to_string()],
        created: 1_690_000_000,
        size: 187_000_000,
        containers: 1,
    }]
}

pub fn sample_volumes() -> Vec<VolumeInfo> {
    vec![VolumeInfo {
        name: "pgdata".to_string(),
        driver: "local".to_string(),
        mountpoint: "/var/lib/docker/volumes/pgdata/_data".to_string(),
        scope: Some("local".to_string()),
        created_at: None,
    }]
}

pub fn sample_networks() -> Vec<NetworkInfo> {
    vec![NetworkInfo {
        id: "n1".to_string(),
        name: "bridge".to_string(),
        driver: "bridge".to_string(),
        scope: "local".to_string(),
        internal: false,
    }]
}

pub fn sample_stats() -> Vec<ContainerStats> {
    vec![ContainerStats {
        id: "abc123".to_string(),
        name: "web".to_string(),
        cpu_percent: 1.5,
        memory_usage: 1024,
        memory_limit: 4096,
        memory_percent: 25.0,
        network_rx: 10,
        network_tx: 20,
        block_read: 0,
        block_write: 4096,
        pids: 3,
    }]
}

#[async_trait]
impl RuntimeInspector for FakeInspector {
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        self.enter(Stage::Containers)?;
        Ok(sample_containers())
    }

    async fn list_images(&self) -> Result<Vec<ImageInfo>> {
        self.enter(Stage::Images)?;
        Ok(sample_images())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>> {
        self.enter(Stage::Volumes)?;
        Ok(sample_volumes())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkInfo>> {
        self.enter(Stage::Networks)?;
        Ok(sample_networks())
    }

    async fn fetch_stats(&self) -> Result<Vec<ContainerStats>> {
        self.enter(Stage::Stats)?;
        Ok(sample_stats())
    }

    async fn fetch_logs(&self, containers: &[ContainerInfo]) -> Result<Vec<ContainerLogs>> {
        self.enter(Stage::Logs)?;
        Ok(containers
            .iter()
            .map(|c| ContainerLogs {
                id: c.id.clone(),
                name: c.name.clone(),
                logs: format!("{} started\n", c.name),
            })
            .collect())
    }
}

/// Router over the given fake, keyed with [`TEST_SECRET`]
pub fn setup_app(inspector: Arc<FakeInspector>) -> axum::Router {
    let state = AppState::new(inspector, SharedSecret::from_value(TEST_SECRET));
    build_router(state)
}

/// Router over a fake that never fails
pub fn default_app() -> axum::Router {
    setup_app(Arc::new(FakeInspector::default()))
}

pub fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// `path?key=<TEST_SECRET>`
pub fn keyed(path: &str) -> String {
    format!("{}?key={}", path, TEST_SECRET)
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
