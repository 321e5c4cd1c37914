//! Click command: resolve one pointer event through a session

use std::path::Path;
use std::process::ExitCode;

use crate::config::loader::CliOverrides;
use crate::models::Verb;
use crate::session::{ClickOutcome, Session};

use super::{load_project, EXIT_ERROR, EXIT_SUCCESS};

pub fn run_click(input: &Path, scene: &str, x: f64, y: f64, verb: Verb, config_path: Option<&Path>) -> ExitCode {
    let project = match load_project(input, config_path, &CliOverrides::default()) {
        Ok(project) => project,
        Err(code) => return code,
    };

    let mut session = match Session::new(&project.scenes, scene) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    session.select_verb(verb);

    match session.click(x, y) {
        Ok(ClickOutcome::Nothing) => println!("Nothing to {} there.", verb),
        Ok(ClickOutcome::Walked { x }) => println!("Walked to x={}", x),
        Ok(ClickOutcome::Narration { hotspot, text }) => println!("{}: {}", hotspot, text),
        Ok(ClickOutcome::Entered { from, to }) => println!("Entered {} from {}", to, from),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
