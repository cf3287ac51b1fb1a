//! Core types and configuration for restamp.
//!
//! This crate defines the `restamp.toml` schema ([`RestampConfig`]), the
//! user variable environment and its template renderer
//! ([`VariableRenderer`]), dynamically shaped configuration values
//! ([`DynamicValue`]) with their dispatcher ([`TypeDispatcher`]), and shared
//! error types.

pub mod config;
pub mod error;
pub mod template;
pub mod value;

pub use config::{CONFIG_FILE_NAME, DockerConfig, ImageConfig, RestampConfig};
pub use error::{Error, Result};
pub use template::{RenderError, VariableEnvironment, VariableRenderer};
pub use value::{DispatchError, DynamicValue, TypeDispatcher, UnsupportedType};
