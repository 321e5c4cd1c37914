//! Configuration schema types for `proom.toml`
//!
//! Defines the structure and validation rules for pixelroom project configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{CatalogOptions, DEFAULT_NOISE_PERCENT};
use crate::perspective::DEFAULT_BASE_SCALE;
use crate::room::{RenderOptions, DEFAULT_PLAYER_BASELINE};

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Output directory for rendered frames
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_out() -> PathBuf {
    PathBuf::from("build")
}

/// Frame rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Pixel scale before depth scaling
    #[serde(default = "default_base_scale")]
    pub base_scale: f64,
    /// Distance from the bottom edge to the top of the player sprite
    #[serde(default = "default_player_baseline")]
    pub player_baseline: u32,
    /// Draw hotspot outlines and exit markers
    #[serde(default)]
    pub debug: bool,
    /// Label every NPC
    #[serde(default)]
    pub show_names: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            base_scale: default_base_scale(),
            player_baseline: default_player_baseline(),
            debug: false,
            show_names: false,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            debug: self.debug,
            show_names: self.show_names,
            base_scale: self.base_scale,
            player_baseline: f64::from(self.player_baseline),
        }
    }
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    400
}

fn default_base_scale() -> f64 {
    DEFAULT_BASE_SCALE
}

fn default_player_baseline() -> u32 {
    DEFAULT_PLAYER_BASELINE as u32
}

/// Procedural catalog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Fixed noise seed; omitted means a fresh seed per run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Share of background cells with brightness jitter, in percent
    #[serde(default = "default_noise_percent")]
    pub noise_percent: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { seed: None, noise_percent: default_noise_percent() }
    }
}

impl CatalogConfig {
    pub fn options(&self) -> CatalogOptions {
        CatalogOptions { seed: self.seed, noise_percent: self.noise_percent }
    }
}

fn default_noise_percent() -> f64 {
    DEFAULT_NOISE_PERCENT
}

/// Root configuration structure for proom.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "proom.toml: '{}' {}", self.field, self.message)
    }
}

impl RoomConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: &str| {
            errors.push(ConfigValidationError { field: field.to_string(), message: message.to_string() })
        };

        if self.project.name.is_empty() {
            fail("project.name", "must be a non-empty string");
        }

        if self.render.width == 0 {
            fail("render.width", "must be a positive integer");
        }
        if self.render.height == 0 {
            fail("render.height", "must be a positive integer");
        }
        if !(self.render.base_scale > 0.0 && self.render.base_scale.is_finite()) {
            fail("render.base_scale", "must be a positive number");
        }
        if self.render.height > 0 && self.render.player_baseline >= self.render.height {
            fail("render.player_baseline", "must be less than render.height");
        }

        if !(0.0..=100.0).contains(&self.catalog.noise_percent) {
            fail("catalog.noise_percent", "must be between 0 and 100");
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
