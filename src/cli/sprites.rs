//! Sprites command: export the built-in library

use std::path::Path;
use std::process::ExitCode;

use rayon::prelude::*;

use crate::catalog::SpriteCatalog;
use crate::config::loader::CliOverrides;
use crate::output::save_png;
use crate::registry::Registry;

use super::{resolve_config, EXIT_ERROR, EXIT_SUCCESS};

pub fn run_sprites(output: &Path, scale: u32, seed: Option<u64>, data_url: bool) -> ExitCode {
    let overrides = CliOverrides { seed, ..Default::default() };
    let (config, _) = match resolve_config(None, None, &overrides) {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };

    let mut catalog = SpriteCatalog::with_options(config.catalog.options());
    catalog.warm_up();
    let ids = catalog.ids();

    if data_url {
        for id in ids {
            let Some(sprite) = catalog.get(id) else {
                continue;
            };
            match sprite.to_data_url(scale) {
                Ok(url) => println!("{} {}", id, url),
                Err(e) => {
                    eprintln!("Error: {}: {}", id, e);
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let failures: Vec<String> = ids
        .par_iter()
        .filter_map(|id| {
            let sprite = catalog.get(id)?;
            let path = output.join(format!("{}.png", id));
            let saved = match sprite.to_image(scale) {
                Ok(image) => save_png(&image, &path).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            saved.err().map(|e| format!("{}: {}", path.display(), e))
        })
        .collect();

    for failure in &failures {
        eprintln!("Error: Failed to save {}", failure);
    }
    if !failures.is_empty() {
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved {} sprites to {} (seed {})", catalog.len(), output.display(), catalog.seed());
    ExitCode::from(EXIT_SUCCESS)
}
