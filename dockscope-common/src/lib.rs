//! # dockscope common library
//!
//! Shared code for the dockscope introspection service:
//! - Shared secret generation and API key validation
//! - Response envelope and error code wire types
//! - Configuration resolution
//! - Container runtime collaborator trait, descriptor models and Docker backend

pub mod api;
pub mod config;
pub mod error;
pub mod runtime;

pub use error::{Error, Result};
pub use runtime::RuntimeInspector;
