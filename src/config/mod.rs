//! Configuration module for pixelroom projects
//!
//! Provides types, discovery and loading for `proom.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
