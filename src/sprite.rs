//! Immutable pixel sprites
//!
//! A [`Sprite`] owns a rectangular [`PixelGrid`] of colors. Cells holding the
//! transparency sentinel are never painted. Sprites are cheap to clone (the
//! grid is shared) and every transform returns a new sprite.

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use rand::Rng;
use thiserror::Error;

use crate::color::{adjust_brightness, is_transparent, parse_color, Color, MAGENTA, TRANSPARENT};
use crate::models::Warning;
use crate::surface::Surface;

/// Error type for sprite transforms and encoding
#[derive(Debug, Error)]
pub enum SpriteError {
    /// Rotation angle other than 90, 180 or 270
    #[error("invalid rotation {0} degrees, expected 90, 180 or 270")]
    InvalidRotation(u16),
    /// Rasterized size does not fit in an image
    #[error("sprite of {width}x{height} is too large to rasterize at scale {scale}")]
    TooLarge { width: usize, height: usize, scale: u32 },
    #[error("failed to encode sprite: {0}")]
    Encode(#[from] image::ImageError),
}

/// Rectangular grid of colors, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl PixelGrid {
    /// Build from possibly jagged rows; short rows are right-padded with transparency.
    pub fn new(rows: Vec<Vec<Color>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Self::default();
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, TRANSPARENT);
            cells.extend(row);
        }
        Self { width, height, cells }
    }

    fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Color) -> Self {
        if width == 0 || height == 0 {
            return Self::default();
        }
        let cells = (0..height).flat_map(|y| (0..width).map(move |x| (x, y))).map(|(x, y)| f(x, y)).collect();
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.width.max(1))
    }
}

/// An immutable pixel-art image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sprite {
    grid: Arc<PixelGrid>,
}

impl Sprite {
    pub fn new(rows: Vec<Vec<Color>>) -> Self {
        Self::from_grid(PixelGrid::new(rows))
    }

    pub fn from_grid(grid: PixelGrid) -> Self {
        Self { grid: Arc::new(grid) }
    }

    /// Parse rows of CSS color strings.
    ///
    /// Empty strings and `transparent` are the transparency sentinel. Invalid
    /// colors render as magenta and produce a warning (lenient mode).
    pub fn parse<S: AsRef<str>>(rows: &[Vec<S>]) -> (Sprite, Vec<Warning>) {
        let mut warnings = Vec::new();
        let grid = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let s = cell.as_ref().trim();
                        match s {
                            "" | "transparent" => TRANSPARENT,
                            _ => parse_color(s).unwrap_or_else(|e| {
                                warnings.push(Warning::new(format!(
                                    "Invalid color '{}' at ({}, {}): {}, using magenta",
                                    s, x, y, e
                                )));
                                MAGENTA
                            }),
                        }
                    })
                    .collect()
            })
            .collect();
        (Sprite::new(grid), warnings)
    }

    /// Build from one-character-per-pixel rows and a palette.
    ///
    /// `.` and space are transparent unless the palette maps them. Unknown
    /// tokens render as magenta with a warning.
    pub fn from_tokens<S: AsRef<str>>(palette: &HashMap<char, Color>, rows: &[S]) -> (Sprite, Vec<Warning>) {
        let mut warnings = Vec::new();
        let grid = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(x, token)| match palette.get(&token) {
                        Some(c) => *c,
                        None if token == '.' || token == ' ' => TRANSPARENT,
                        None => {
                            warnings.push(Warning::new(format!(
                                "Unknown token '{}' at ({}, {})",
                                token, x, y
                            )));
                            MAGENTA
                        }
                    })
                    .collect()
            })
            .collect();
        (Sprite::new(grid), warnings)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Color at `(x, y)`, `None` when out of range.
    pub fn pixel_at(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.grid.get(x as usize, y as usize)
    }

    pub fn flip_horizontal(&self) -> Sprite {
        let (w, h) = (self.width(), self.height());
        self.map_grid(w, h, |x, y| self.cell(w - 1 - x, y))
    }

    pub fn flip_vertical(&self) -> Sprite {
        let (w, h) = (self.width(), self.height());
        self.map_grid(w, h, |x, y| self.cell(x, h - 1 - y))
    }

    /// Rotate clockwise by 90, 180 or 270 degrees.
    pub fn rotate(&self, degrees: u16) -> Result<Sprite, SpriteError> {
        let (w, h) = (self.width(), self.height());
        match degrees {
            90 => Ok(self.map_grid(h, w, |x, y| self.cell(y, h - 1 - x))),
            180 => Ok(self.flip_horizontal().flip_vertical()),
            270 => Ok(self.map_grid(h, w, |x, y| self.cell(w - 1 - y, x))),
            other => Err(SpriteError::InvalidRotation(other)),
        }
    }

    fn cell(&self, x: usize, y: usize) -> Color {
        self.grid.get(x, y).unwrap_or(TRANSPARENT)
    }

    fn map_grid(&self, width: usize, height: usize, f: impl Fn(usize, usize) -> Color) -> Sprite {
        Sprite::from_grid(PixelGrid::from_fn(width, height, f))
    }

    /// Paint onto `surface` with the top-left corner at `(x, y)`.
    ///
    /// Each opaque cell becomes a `scale × scale` block; runs of equal color
    /// along a row are filled as one block.
    pub fn render(&self, surface: &mut Surface, x: f64, y: f64, scale: f64) {
        self.render_tinted(surface, x, y, scale, None);
    }

    /// Like [`Sprite::render`], but every opaque cell is painted `tint` (used for shadows).
    pub fn render_tinted(&self, surface: &mut Surface, x: f64, y: f64, scale: f64, tint: Option<Color>) {
        if scale <= 0.0 {
            return;
        }
        let paint = |c: Color| if is_transparent(c) { None } else { Some(tint.unwrap_or(c)) };
        for (row_idx, row) in self.grid.rows().enumerate() {
            let top = y + row_idx as f64 * scale;
            let mut col = 0;
            while col < row.len() {
                let start = col;
                let color = paint(row[col]);
                col += 1;
                while col < row.len() && paint(row[col]) == color {
                    col += 1;
                }
                if let Some(color) = color {
                    let left = x + start as f64 * scale;
                    let width = (col - start) as f64 * scale;
                    surface.fill_rect(left, top, width, scale, color);
                }
            }
        }
    }

    /// Rasterize at an integer scale.
    ///
    /// Fails with [`SpriteError::TooLarge`] when either scaled side overflows `u32`.
    pub fn to_image(&self, scale: u32) -> Result<RgbaImage, SpriteError> {
        let scale = scale.max(1);
        let side = |n: usize| u32::try_from(n).ok().and_then(|n| n.checked_mul(scale));
        let (Some(width), Some(height)) = (side(self.width()), side(self.height())) else {
            return Err(SpriteError::TooLarge { width: self.width(), height: self.height(), scale });
        };
        let mut surface = Surface::new(width, height);
        self.render(&mut surface, 0.0, 0.0, f64::from(scale));
        Ok(surface.into_image())
    }

    /// PNG-encoded bytes at an integer scale.
    pub fn to_raster_blob(&self, scale: u32) -> Result<Vec<u8>, SpriteError> {
        let image = self.to_image(scale)?;
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)?;
        Ok(bytes)
    }

    /// The PNG blob as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self, scale: u32) -> Result<String, SpriteError> {
        let blob = self.to_raster_blob(scale)?;
        Ok(format!("data:image/png;base64,{}", base64::engine::general_purpose::STANDARD.encode(blob)))
    }

    /// Copy with roughly `percent`% of opaque cells shifted by up to ±`amount`.
    pub fn with_variation(&self, percent: f64, amount: i32, rng: &mut impl Rng) -> Sprite {
        let p = (percent / 100.0).clamp(0.0, 1.0);
        let rows = self
            .grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&c| {
                        if is_transparent(c) || !rng.gen_bool(p) {
                            c
                        } else {
                            adjust_brightness(c, rng.gen_range(-amount.abs()..=amount.abs()))
                        }
                    })
                    .collect()
            })
            .collect();
        Sprite::new(rows)
    }
}
