//! List command: print scenes, hotspots and exits

use std::path::Path;
use std::process::ExitCode;

use serde_json::{json, Value};

use crate::config::loader::CliOverrides;
use crate::scene::Scene;

use super::{load_project, EXIT_ERROR, EXIT_SUCCESS};

fn scene_json(scene: &Scene) -> Value {
    let hotspots: Vec<Value> = scene
        .hotspots
        .iter()
        .map(|h| {
            json!({
                "name": h.name,
                "x": h.x,
                "y": h.y,
                "width": h.width,
                "height": h.height,
                "verbs": h.actions.keys().map(|v| v.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let exits: Vec<Value> = scene
        .exits
        .iter()
        .map(|(destination, at)| json!({ "to": destination, "x": at.x, "y": at.y }))
        .collect();

    json!({
        "id": scene.id,
        "description": scene.description,
        "elements": scene.elements.len(),
        "npcs": scene.npcs.len(),
        "hotspots": hotspots,
        "exits": exits,
    })
}

fn print_scene(scene: &Scene) {
    if scene.description.is_empty() {
        println!("{}", scene.id);
    } else {
        println!("{}: {}", scene.id, scene.description);
    }
    for hotspot in &scene.hotspots {
        let verbs: Vec<&str> = hotspot.actions.keys().map(|v| v.as_str()).collect();
        println!(
            "  hotspot {} at ({}, {}) {}x{} [{}]",
            hotspot.name,
            hotspot.x,
            hotspot.y,
            hotspot.width,
            hotspot.height,
            verbs.join(", ")
        );
    }
    for (destination, at) in &scene.exits {
        println!("  exit to {} at ({}, {})", destination, at.x, at.y);
    }
}

pub fn run_list(input: &Path, json: bool) -> ExitCode {
    let project = match load_project(input, None, &CliOverrides::default()) {
        Ok(project) => project,
        Err(code) => return code,
    };

    let scenes: Vec<&Scene> = project.scenes.ids().into_iter().filter_map(|id| project.scenes.get_scene(id)).collect();

    if json {
        let listing = Value::Array(scenes.iter().map(|s| scene_json(s)).collect());
        match serde_json::to_string_pretty(&listing) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: Failed to serialize listing: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for scene in scenes {
            print_scene(scene);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
