//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod click;
mod list;
mod render;
mod sprites;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::catalog::SpriteCatalog;
use crate::config::loader::{
    default_config, find_config, find_config_from, find_xdg_config, load_config, merge_cli_overrides, CliOverrides,
};
use crate::config::RoomConfig;
use crate::models::Verb;
use crate::parser::{load_into, parse_file, ParseResult};
use crate::scene::SceneRegistry;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Find all content files in a directory (recursively), sorted.
pub fn find_content_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for ext in ["jsonl", "json5"] {
        if let Ok(paths) = glob(&format!("{}/**/*.{}", dir.display(), ext)) {
            files.extend(paths.filter_map(Result::ok));
        }
    }
    files.sort();
    files
}

/// Pixelroom - Render point-and-click adventure rooms from scene files
#[derive(Parser)]
#[command(name = "proom")]
#[command(about = "Pixelroom - Render point-and-click adventure rooms from scene files (.jsonl, .json5)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render scenes to PNG
    Render {
        /// Content file, or a directory of them
        input: PathBuf,

        /// Only render the scene with this id
        #[arg(short, long)]
        scene: Option<String>,

        /// Render every scene (in parallel)
        #[arg(long, conflicts_with = "scene")]
        all: bool,

        /// Output file or directory.
        /// If omitted: the project's out directory, or {input}_{scene}.png
        /// If file (single scene): output.png
        /// If file (multiple): output_{scene}.png
        /// If directory (ends with /): dir/{scene}.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for {scene}.png frames (overrides the project's out directory)
        #[arg(long, conflicts_with = "output")]
        out_dir: Option<PathBuf>,

        /// Frame width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Frame height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Base pixel scale before depth scaling
        #[arg(long)]
        scale: Option<f64>,

        /// Draw hotspot outlines and exit markers
        #[arg(long)]
        debug: bool,

        /// Label every NPC
        #[arg(long)]
        show_names: bool,

        /// Draw the player at this x position
        #[arg(long)]
        player_x: Option<f64>,

        /// Noise seed for procedural sprites
        #[arg(long)]
        seed: Option<u64>,

        /// Directory of PNG backgrounds (default: procedural backgrounds)
        #[arg(long)]
        backgrounds: Option<PathBuf>,

        /// Path to proom.toml (default: search upward from the input)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Resolve a click in a scene and print what happens
    Click {
        /// Content file with scene and sprite definitions
        input: PathBuf,

        /// Scene to click in
        #[arg(short, long)]
        scene: String,

        /// Pointer x in surface pixels
        #[arg(long)]
        x: f64,

        /// Pointer y in surface pixels
        #[arg(long)]
        y: f64,

        /// Verb to apply: walk, look, talk, use, take
        #[arg(long, default_value = "walk")]
        verb: Verb,

        /// Path to proom.toml (default: search upward from the input)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export the built-in sprite library as PNGs
    Sprites {
        /// Output directory
        #[arg(short, long, default_value = "sprites")]
        output: PathBuf,

        /// Integer scale factor (1-16)
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..=16))]
        scale: u32,

        /// Noise seed for procedural sprites
        #[arg(long)]
        seed: Option<u64>,

        /// Print data URLs instead of writing files
        #[arg(long)]
        data_url: bool,
    },

    /// List scenes, hotspots and exits in a content file
    List {
        /// Content file with scene and sprite definitions
        input: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Loaded configuration, catalog and scenes for one content file.
pub(crate) struct Project {
    pub config: RoomConfig,
    /// Directory of the proom.toml in effect, if one was found
    pub root: Option<PathBuf>,
    pub catalog: SpriteCatalog,
    pub scenes: SceneRegistry,
}

/// Resolve configuration for `input`: an explicit path, else the nearest
/// proom.toml above the input (or the working directory), then the XDG
/// config dir, else defaults.
pub(crate) fn resolve_config(
    input: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<(RoomConfig, Option<PathBuf>), ExitCode> {
    let found = match (config_path, input) {
        (Some(p), _) => Some(p.to_path_buf()),
        (None, Some(input)) => {
            let input_abs = std::fs::canonicalize(input).unwrap_or_else(|_| input.to_path_buf());
            let start = if input_abs.is_dir() { Some(input_abs.as_path()) } else { input_abs.parent() };
            start.and_then(|dir| find_config_from(dir.to_path_buf())).or_else(find_xdg_config)
        }
        (None, None) => find_config(),
    };

    let mut config = match &found {
        Some(path) => load_config(Some(path)).map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        })?,
        None => default_config(),
    };
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in errors {
            eprintln!("Error: {}", e);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    let root = found.and_then(|p| p.parent().map(Path::to_path_buf));
    Ok((config, root))
}

/// Parse `input` (a file, or every content file under a directory), register
/// its content, then fill in the built-in library.
pub(crate) fn load_project(
    input: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Project, ExitCode> {
    let (config, root) = resolve_config(Some(input), config_path, overrides)?;

    let files = if input.is_dir() {
        let files = find_content_files(input);
        if files.is_empty() {
            eprintln!("Error: No .jsonl or .json5 files found in '{}'", input.display());
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        files
    } else {
        vec![input.to_path_buf()]
    };

    let mut catalog = SpriteCatalog::with_options(config.catalog.options());
    let mut scenes = SceneRegistry::new();
    for file in &files {
        let parsed: ParseResult = match parse_file(file) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("Error: Cannot open input file '{}': {}", file.display(), e);
                return Err(ExitCode::from(EXIT_INVALID_ARGS));
            }
        };
        for warning in &parsed.warnings {
            eprintln!("Warning: {}: {}", file.display(), warning);
        }
        for warning in load_into(parsed.objects, &mut catalog, &mut scenes) {
            eprintln!("Warning: {}", warning);
        }
    }
    catalog.warm_up();

    Ok(Project { config, root, catalog, scenes })
}

/// Entry point for the `proom` binary.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            scene,
            all,
            output,
            out_dir,
            width,
            height,
            scale,
            debug,
            show_names,
            player_x,
            seed,
            backgrounds,
            config,
        } => {
            let overrides = CliOverrides {
                out: out_dir,
                width,
                height,
                base_scale: scale,
                debug: debug.then_some(true),
                show_names: show_names.then_some(true),
                seed,
            };
            render::run_render(
                &input,
                scene.as_deref(),
                all,
                output.as_deref(),
                player_x,
                backgrounds.as_deref(),
                config.as_deref(),
                &overrides,
            )
        }
        Commands::Click { input, scene, x, y, verb, config } => {
            click::run_click(&input, &scene, x, y, verb, config.as_deref())
        }
        Commands::Sprites { output, scale, seed, data_url } => sprites::run_sprites(&output, scale, seed, data_url),
        Commands::List { input, json } => list::run_list(&input, json),
    }
}
