//! Pixelroom - Command-line tool for rendering adventure rooms from scene files

use std::process::ExitCode;

use pixelroom::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
