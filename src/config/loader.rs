//! Configuration loading and discovery for `proom.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{CatalogConfig, ProjectConfig, RenderConfig, RoomConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "proom.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse proom.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Override base pixel scale
    pub base_scale: Option<f64>,
    pub debug: Option<bool>,
    pub show_names: Option<bool>,
    /// Override the catalog noise seed
    pub seed: Option<u64>,
}

/// Find proom.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for proom.toml
/// 2. Check XDG_CONFIG_HOME/pixelroom/proom.toml (or ~/.config/pixelroom/proom.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find proom.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixelroom").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find proom.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a proom.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("hotel/proom.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<RoomConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<RoomConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RoomConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Create a default configuration when no proom.toml is found.
///
/// The project name is the current directory name.
pub fn default_config() -> RoomConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    RoomConfig {
        project: ProjectConfig { name: project_name, out: PathBuf::from("build") },
        render: RenderConfig::default(),
        catalog: CatalogConfig::default(),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut RoomConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }
    if let Some(width) = overrides.width {
        config.render.width = width;
    }
    if let Some(height) = overrides.height {
        config.render.height = height;
    }
    if let Some(base_scale) = overrides.base_scale {
        config.render.base_scale = base_scale;
    }
    if let Some(debug) = overrides.debug {
        config.render.debug = debug;
    }
    if let Some(show_names) = overrides.show_names {
        config.render.show_names = show_names;
    }
    if let Some(seed) = overrides.seed {
        config.catalog.seed = Some(seed);
    }
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
