//! Integration tests for config file loading
//!
//! Tests cover:
//! - Explicit config path must exist and parse
//! - Missing default config file falls back to compiled defaults
//! - Config file values sit between CLI/env overrides and defaults
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate XDG_CONFIG_HOME are marked with #[serial].

use dockscope_common::config::{
    load_config_file, ConfigOverrides, ServerConfig, DEFAULT_LOG_TAIL, DEFAULT_PORT,
};
use dockscope_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_explicit_config_file_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dockscope.toml");
    fs::write(&path, "bind_addr = \"0.0.0.0\"\nport = 9090\n").unwrap();

    let file = load_config_file(Some(path.as_path())).unwrap().expect("config should load");
    let config = ServerConfig::resolve(&ConfigOverrides::default(), Some(&file));

    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 9090);
    assert_eq!(config.log_tail, DEFAULT_LOG_TAIL);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = load_config_file(Some(path.as_path()));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "port = [not toml").unwrap();

    let result = load_config_file(Some(path.as_path()));

    assert!(matches!(result, Err(Error::Toml(_))));
}

#[test]
fn test_overrides_beat_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dockscope.toml");
    fs::write(&path, "port = 9090\nlog_tail = 10\n").unwrap();

    let file = load_config_file(Some(path.as_path())).unwrap();
    let overrides = ConfigOverrides {
        port: Some(7000),
        ..Default::default()
    };
    let config = ServerConfig::resolve(&overrides, file.as_ref());

    assert_eq!(config.port, 7000);
    assert_eq!(config.log_tail, 10);
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_missing_uses_defaults() {
    let dir = TempDir::new().unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let file = load_config_file(None).unwrap();
    let config = ServerConfig::resolve(&ConfigOverrides::default(), file.as_ref());

    env::remove_var("XDG_CONFIG_HOME");

    assert!(file.is_none());
    assert_eq!(config.port, DEFAULT_PORT);
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_is_read_when_present() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("dockscope");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "port = 6001\n").unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let file = load_config_file(None).unwrap();

    env::remove_var("XDG_CONFIG_HOME");

    assert_eq!(file.and_then(|f| f.port), Some(6001));
}
