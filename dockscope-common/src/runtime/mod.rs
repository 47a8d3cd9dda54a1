//! Container runtime collaborators
//!
//! The HTTP layer never talks to the runtime directly. It calls one method of
//! [`RuntimeInspector`] per request and serializes whatever comes back.
//! [`DockerInspector`] is the production implementation; tests supply their
//! own.

pub mod docker;
pub mod models;
pub mod stats;

use async_trait::async_trait;

use crate::Result;

pub use docker::DockerInspector;
pub use models::{
    ContainerInfo, ContainerLogs, ContainerStats, ImageInfo, NetworkInfo, PortMapping, VolumeInfo,
};

/// Read-only queries against a container runtime
///
/// Implementations must be safe to call concurrently from many requests.
#[async_trait]
pub trait RuntimeInspector: Send + Sync {
    /// All containers, running or stopped
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>>;

    /// Top-level images
    async fn list_images(&self) -> Result<Vec<ImageInfo>>;

    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>>;

    async fn list_networks(&self) -> Result<Vec<NetworkInfo>>;

    /// One resource usage sample per running container
    async fn fetch_stats(&self) -> Result<Vec<ContainerStats>>;

    /// Recent log output for each of `containers`
    async fn fetch_logs(&self, containers: &[ContainerInfo]) -> Result<Vec<ContainerLogs>>;
}
