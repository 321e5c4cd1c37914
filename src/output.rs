//! PNG output and file path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Generate the output path for one rendered frame or sprite.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}_{name}.png` next to the input |
/// | `-o frame.png`, single item | `frame.png` |
/// | `-o frame.png`, several items | `frame_{name}.png` |
/// | `-o dir/` or an existing directory | `dir/{name}.png` |
pub fn generate_output_path(input: &Path, name: &str, output_arg: Option<&Path>, is_single: bool) -> PathBuf {
    let Some(output) = output_arg else {
        return sibling(input, &format!("{}_{}.png", stem(input), name));
    };

    let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
    if is_dir {
        output.join(format!("{}.png", name))
    } else if is_single {
        output.to_path_buf()
    } else {
        sibling(output, &format!("{}_{}.png", stem(output), name))
    }
}

fn stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("output")
}

/// `file_name` placed in the same directory as `path`.
fn sibling(path: &Path, file_name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
