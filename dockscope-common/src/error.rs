//! Common error types for dockscope

use thiserror::Error;

/// Common result type for dockscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across dockscope crates
#[derive(Error, Debug)]
pub enum Error {
    /// Container runtime query failed (connection, API or decode error)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for the expected shape
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// OS random source unavailable
    #[error("Random source error: {0}")]
    Random(String),
}

impl From<bollard::errors::Error> for Error {
    fn from(err: bollard::errors::Error) -> Self {
        Error::Runtime(err.to_string())
    }
}
