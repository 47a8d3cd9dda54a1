//! Docker Engine implementation of [`RuntimeInspector`]
//!
//! Only read endpoints of the Engine API are used. Nothing here creates,
//! starts, stops or removes anything.

use async_trait::async_trait;
use bollard::container::{ListContainersOptions, LogsOptions, Stats, StatsOptions};
use bollard::image::ListImagesOptions;
use bollard::models::{ContainerSummary, ImageSummary, Network, Port, Volume};
use bollard::Docker;
use futures::{future, stream, Future, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::models::{
    ContainerInfo, ContainerLogs, ContainerStats, ImageInfo, NetworkInfo, PortMapping, VolumeInfo,
};
use super::stats::{block_io, cpu_percent, memory_percent, CpuSample};
use super::RuntimeInspector;
use crate::{Error, Result};

/// Per-container Engine API requests in flight at once
const MAX_CONCURRENT_FETCHES: usize = 16;

/// Docker client for read-only runtime introspection
pub struct DockerInspector {
    docker: Docker,
    log_tail: usize,
}

impl DockerInspector {
    /// Build a client from local defaults (`DOCKER_HOST` or the platform socket)
    ///
    /// Does not contact the daemon; see [`DockerInspector::ping`].
    pub fn connect(log_tail: usize) -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self { docker, log_tail })
    }

    /// Verify the daemon answers
    pub async fn ping(&self) -> Result<()> {
        self.docker.ping().await?;
        info!("Connected to Docker daemon");
        Ok(())
    }

    /// One non-streaming stats sample; `None` if the container went away
    async fn sample_stats(&self, id: &str) -> Result<Option<ContainerStats>> {
        let options = StatsOptions {
            stream: false,
            // one_shot skips the second sample the CPU delta needs
            one_shot: false,
        };

        let mut stream = Box::pin(self.docker.stats(id, Some(options)));
        match stream.next().await {
            Some(Ok(sample)) => Ok(Some(container_stats(&sample))),
            Some(Err(e)) if is_not_found(&e) => {
                debug!(container = %id, "Container vanished before stats sample");
                Ok(None)
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(Error::Runtime(format!(
                "No stats sample for container {}",
                id
            ))),
        }
    }

    /// Log tail of one container; `None` if the container went away
    async fn container_logs(&self, container: &ContainerInfo) -> Result<Option<String>> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            tail: tail_option(self.log_tail),
            ..Default::default()
        };

        let chunks: std::result::Result<Vec<_>, _> = self
            .docker
            .logs(&container.id, Some(options))
            .try_collect()
            .await;

        match chunks {
            Ok(chunks) => Ok(Some(
                chunks
                    .into_iter()
                    .map(|chunk| chunk.to_string())
                    .collect::<Vec<_>>()
                    .join(""),
            )),
            Err(e) if is_not_found(&e) => {
                debug!(container = %container.id, "Container vanished before log fetch");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl RuntimeInspector for DockerInspector {
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };

        let containers = self.docker.list_containers(Some(options)).await?;
        Ok(containers.into_iter().map(container_info).collect())
    }

    async fn list_images(&self) -> Result<Vec<ImageInfo>> {
        let options = ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        };

        let images = self.docker.list_images(Some(options)).await?;
        Ok(images.into_iter().map(image_info).collect())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>> {
        let response = self.docker.list_volumes::<String>(None).await?;
        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(volume_info)
            .collect())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkInfo>> {
        let networks = self.docker.list_networks::<String>(None).await?;
        Ok(networks.into_iter().map(network_info).collect())
    }

    async fn fetch_stats(&self) -> Result<Vec<ContainerStats>> {
        // Running containers only; stopped ones have no live counters
        let running = self
            .docker
            .list_containers(Some(ListContainersOptions::<String>::default()))
            .await?;

        let samples = running
            .into_iter()
            .filter_map(|container| container.id)
            .map(|id| async move { self.sample_stats(&id).await });

        gather_present(samples).await
    }

    async fn fetch_logs(&self, containers: &[ContainerInfo]) -> Result<Vec<ContainerLogs>> {
        let fetches = containers
            .iter()
            .map(|container| async move {
                let output = self.container_logs(container).await?;
                Ok::<_, Error>(output.map(|logs| ContainerLogs {
                    id: container.id.clone(),
                    name: container.name.clone(),
                    logs,
                }))
            })
            .collect::<Vec<_>>();

        gather_present(fetches).await
    }
}

// ========================================
// Conversions
// ========================================

fn container_info(summary: ContainerSummary) -> ContainerInfo {
    let name = summary
        .names
        .as_ref()
        .and_then(|names| names.first())
        .map(|name| name.trim_start_matches('/').to_string())
        .unwrap_or_default();

    ContainerInfo {
        id: summary.id.unwrap_or_default(),
        name,
        image: summary.image.unwrap_or_default(),
        command: summary.command.unwrap_or_default(),
        created: summary.created.unwrap_or_default(),
        state: summary.state.unwrap_or_default(),
        status: summary.status.unwrap_or_default(),
        ports: summary
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(port_mapping)
            .collect(),
    }
}

fn port_mapping(port: Port) -> PortMapping {
    PortMapping {
        ip: port.ip,
        private_port: port.private_port,
        public_port: port.public_port,
        protocol: port.typ.map(|t| t.to_string()),
    }
}

fn image_info(summary: ImageSummary) -> ImageInfo {
    ImageInfo {
        id: summary.id,
        tags: summary.repo_tags,
        created: summary.created,
        size: summary.size,
        containers: summary.containers,
    }
}

fn volume_info(volume: Volume) -> VolumeInfo {
    VolumeInfo {
        name: volume.name,
        driver: volume.driver,
        mountpoint: volume.mountpoint,
        scope: volume.scope.map(|s| s.to_string()),
        created_at: volume.created_at,
    }
}

fn network_info(network: Network) -> NetworkInfo {
    NetworkInfo {
        id: network.id.unwrap_or_default(),
        name: network.name.unwrap_or_default(),
        driver: network.driver.unwrap_or_default(),
        scope: network.scope.unwrap_or_default(),
        internal: network.internal.unwrap_or(false),
    }
}

fn container_stats(sample: &Stats) -> ContainerStats {
    let current = CpuSample {
        total_usage: sample.cpu_stats.cpu_usage.total_usage,
        system_usage: sample.cpu_stats.system_cpu_usage,
        online_cpus: sample.cpu_stats.online_cpus,
        percpu_count: sample
            .cpu_stats
            .cpu_usage
            .percpu_usage
            .as_ref()
            .map_or(0, Vec::len),
    };
    let previous = CpuSample {
        total_usage: sample.precpu_stats.cpu_usage.total_usage,
        system_usage: sample.precpu_stats.system_cpu_usage,
        online_cpus: sample.precpu_stats.online_cpus,
        percpu_count: 0,
    };

    let memory_usage = sample.memory_stats.usage.unwrap_or(0);
    let memory_limit = sample.memory_stats.limit.unwrap_or(0);

    let (network_rx, network_tx) = sample
        .networks
        .as_ref()
        .map(|networks| {
            networks
                .values()
                .fold((0, 0), |(rx, tx), n| (rx + n.rx_bytes, tx + n.tx_bytes))
        })
        .unwrap_or((0, 0));

    let (block_read, block_write) = sample
        .blkio_stats
        .io_service_bytes_recursive
        .as_ref()
        .map(|entries| block_io(entries.iter().map(|e| (e.op.as_str(), e.value))))
        .unwrap_or((0, 0));

    ContainerStats {
        id: sample.id.clone(),
        name: sample.name.trim_start_matches('/').to_string(),
        cpu_percent: cpu_percent(&current, &previous),
        memory_usage,
        memory_limit,
        memory_percent: memory_percent(memory_usage, memory_limit),
        network_rx,
        network_tx,
        block_read,
        block_write,
        pids: sample.pids_stats.current.unwrap_or(0),
    }
}

/// Run per-container fetches concurrently, keeping listing order
///
/// `None` results (container gone) are dropped. The first error fails the
/// whole batch.
async fn gather_present<I, F, T>(fetches: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<Option<T>>>,
{
    stream::iter(fetches)
        .buffered(MAX_CONCURRENT_FETCHES)
        .try_filter_map(|item| future::ready(Ok(item)))
        .try_collect()
        .await
}

/// Engine API `tail` parameter; 0 means the whole log
fn tail_option(log_tail: usize) -> String {
    if log_tail == 0 {
        "all".to_string()
    } else {
        log_tail.to_string()
    }
}

fn is_not_found(err: &bollard::errors::Error) -> bool {
    matches!(
        err,
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}
