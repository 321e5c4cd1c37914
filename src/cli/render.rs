//! Render command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;

use crate::config::loader::{resolve_path, CliOverrides};
use crate::output::{generate_output_path, save_png};
use crate::provider::{CatalogProvider, DirectoryProvider, ImageProvider};
use crate::room::{PlayerState, RoomRenderer};

use super::{load_project, Project, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
#[allow(clippy::too_many_arguments)]
pub fn run_render(
    input: &Path,
    scene_filter: Option<&str>,
    all: bool,
    output: Option<&Path>,
    player_x: Option<f64>,
    backgrounds: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let project = match load_project(input, config_path, overrides) {
        Ok(project) => project,
        Err(code) => return code,
    };

    let ids: Vec<String> = match (scene_filter, all) {
        (Some(id), _) => vec![id.to_string()],
        (None, true) => project.scenes.ids().into_iter().map(String::from).collect(),
        (None, false) => match project.scenes.ids().as_slice() {
            [only] => vec![only.to_string()],
            [] => {
                eprintln!("Error: No scenes found in '{}'", input.display());
                return ExitCode::from(EXIT_ERROR);
            }
            many => {
                eprintln!("Error: {} scenes found; pass --scene ID or --all", many.len());
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
    };
    if ids.is_empty() {
        eprintln!("Error: No scenes found in '{}'", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    // --out-dir is relative to the working directory, the config's out to the project root
    let out_dir = match (output, &overrides.out, &project.root) {
        (Some(_), _, _) => None,
        (None, Some(dir), _) => Some(dir.clone()),
        (None, None, Some(root)) => Some(resolve_path(root, &project.config.project.out)),
        (None, None, None) => None,
    };
    let is_single = ids.len() == 1;

    // Each worker owns its surface, renderer and provider; catalog and scenes are shared.
    let results: Vec<Result<PathBuf, String>> = ids
        .par_iter()
        .map(|id| {
            let path = match &out_dir {
                Some(dir) => dir.join(format!("{}.png", id)),
                None => generate_output_path(input, id, output, is_single),
            };
            render_scene(&project, id, player_x, backgrounds, &path).map(|()| path)
        })
        .collect();

    let mut failed = false;
    for result in results {
        match result {
            Ok(path) => println!("Saved: {}", path.display()),
            Err(message) => {
                eprintln!("Error: {}", message);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn render_scene(
    project: &Project,
    id: &str,
    player_x: Option<f64>,
    backgrounds: Option<&Path>,
    path: &Path,
) -> Result<(), String> {
    let provider: Box<dyn ImageProvider> = match backgrounds {
        Some(dir) => Box::new(DirectoryProvider::new(dir)),
        None => Box::new(CatalogProvider::new(&project.catalog)),
    };
    let render = &project.config.render;
    let mut renderer =
        RoomRenderer::new(&project.catalog, &project.scenes, provider.as_ref(), render.width, render.height)
            .with_options(render.options());
    renderer.set_player(player_x.map(PlayerState::at));

    let report = renderer.render_room(id).map_err(|e| e.to_string())?;
    for warning in &report.warnings {
        eprintln!("Warning: {}: {}", id, warning);
    }

    save_png(renderer.frame(), path).map_err(|e| format!("Failed to save '{}': {}", path.display(), e))
}
