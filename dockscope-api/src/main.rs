//! dockscope - Read-only container runtime introspection over HTTP
//!
//! Generates a fresh API key on every start, prints it once, and serves
//! containers, images, volumes, networks, stats and logs from the local
//! Docker daemon to callers presenting that key.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dockscope_api::{build_info, build_router, AppState};
use dockscope_common::api::SharedSecret;
use dockscope_common::config::{load_config_file, ConfigOverrides, ServerConfig};
use dockscope_common::runtime::DockerInspector;
use tracing::{error, info, warn};

/// Command-line arguments for dockscope
#[derive(Parser, Debug)]
#[command(name = "dockscope")]
#[command(about = "Read-only container runtime introspection API")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(short, long, env = "DOCKSCOPE_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "DOCKSCOPE_PORT")]
    port: Option<u16>,

    /// Log lines returned per container by /logs (0 = all)
    #[arg(long, env = "DOCKSCOPE_LOG_TAIL")]
    log_tail: Option<usize>,

    /// TOML config file
    #[arg(short, long, env = "DOCKSCOPE_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_addr: self.bind.clone(),
            port: self.port,
            log_tail: self.log_tail,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Starting dockscope {}", build_info());

    let args = Args::parse();

    let file = load_config_file(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServerConfig::resolve(&args.overrides(), file.as_ref());
    info!(
        "Config: listen {}, log tail {}",
        config.listen_address(),
        config.log_tail
    );

    // No fallback secret: a broken random source stops startup here
    let shared_secret = SharedSecret::generate().context("Failed to generate API key")?;
    println!("API key: {}", shared_secret.expose());
    info!("✓ API key generated (printed to stdout)");

    let inspector = DockerInspector::connect(config.log_tail)
        .context("Failed to configure Docker client")?;
    if let Err(e) = inspector.ping().await {
        warn!("Docker daemon not reachable: {} (runtime endpoints will answer RUNTIME_ERROR)", e);
    }

    let state = AppState::new(Arc::new(inspector), shared_secret);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.bind_addr.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_address()))?;
    info!("dockscope listening on http://{}", config.listen_address());
    info!("Status check: http://{}/status", config.listen_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("dockscope stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
