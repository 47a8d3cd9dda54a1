//! Descriptor types returned by runtime collaborators
//!
//! These are the payloads that end up in the `result` field of a successful
//! envelope, so their serde shape is part of the HTTP API.

use serde::{Deserialize, Serialize};

/// Container summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Full container id
    pub id: String,
    /// Primary name without the leading `/`
    pub name: String,
    pub image: String,
    pub command: String,
    /// Creation time, Unix seconds
    pub created: i64,
    /// Machine state (`running`, `exited`, ...)
    pub state: String,
    /// Human status (`Up 3 hours`, ...)
    pub status: String,
    pub ports: Vec<PortMapping>,
}

/// Published or exposed port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub ip: Option<String>,
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: Option<String>,
}

/// Image summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: String,
    /// `repository:tag` references; empty for dangling images
    pub tags: Vec<String>,
    /// Creation time, Unix seconds
    pub created: i64,
    /// Size in bytes
    pub size: i64,
    /// Containers using this image, -1 when the runtime did not count
    pub containers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub scope: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
    pub internal: bool,
}

/// Resource usage sample for one container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStats {
    pub id: String,
    pub name: String,
    pub cpu_percent: f64,
    /// Bytes
    pub memory_usage: u64,
    /// Bytes
    pub memory_limit: u64,
    pub memory_percent: f64,
    /// Bytes received, all interfaces
    pub network_rx: u64,
    /// Bytes sent, all interfaces
    pub network_tx: u64,
    pub block_read: u64,
    pub block_write: u64,
    pub pids: u64,
}

/// Log tail for one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLogs {
    pub id: String,
    pub name: String,
    /// stdout and stderr interleaved in stream order
    pub logs: String,
}
