//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Layers 1 and 2 are merged by clap in the binary and arrive here as
//! [`ConfigOverrides`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default number of log lines fetched per container
pub const DEFAULT_LOG_TAIL: usize = 100;

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Lines of log output per container; 0 fetches everything
    pub log_tail: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_tail: DEFAULT_LOG_TAIL,
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
    pub log_tail: Option<usize>,
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
    pub log_tail: Option<usize>,
}

impl ServerConfig {
    /// Merge overrides over the config file over compiled defaults
    pub fn resolve(overrides: &ConfigOverrides, file: Option<&FileConfig>) -> Self {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        Self {
            bind_addr: overrides
                .bind_addr
                .clone()
                .or(file.bind_addr)
                .unwrap_or(defaults.bind_addr),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            log_tail: overrides
                .log_tail
                .or(file.log_tail)
                .unwrap_or(defaults.log_tail),
        }
    }

    /// `host:port` string for logging
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Parse TOML config text
pub fn parse_config(text: &str) -> Result<FileConfig> {
    Ok(toml::from_str(text)?)
}

/// Load the config file
///
/// An explicit path must exist and parse. Without one, the platform default
/// (`<config_dir>/dockscope/config.toml`) is used when present and skipped
/// otherwise.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(None);
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;

    debug!("Loaded config file {}", path.display());
    parse_config(&text).map(Some)
}

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dockscope").join("config.toml"))
}
