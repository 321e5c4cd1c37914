//! Pixelroom - Library for rendering 2D point-and-click adventure rooms
//!
//! This library provides functionality to:
//! - Build procedural pixel-art sprites and keep them in a catalog
//! - Describe scenes (background, elements, NPCs, hotspots, exits) as data
//! - Render rooms with perspective scaling, depth ordering and drop shadows
//! - Resolve pointer clicks into hotspot interactions
//! - Load scenes and sprites from JSON5/JSONL content files

pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod font;
pub mod hotspot;
pub mod models;
pub mod output;
pub mod parser;
pub mod perspective;
pub mod provider;
pub mod registry;
pub mod room;
pub mod scene;
pub mod session;
pub mod sprite;
pub mod surface;
