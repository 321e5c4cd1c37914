//! Color parsing and shading for sprite palettes and room shells
//!
//! Colors are plain `image::Rgba<u8>` values. Parsing accepts:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hwb()`, ...
//! - Named: `red`, `blue`, `transparent`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// An RGBA color as stored in sprites and surfaces.
pub type Color = Rgba<u8>;

/// The transparency sentinel. Cells holding it are never painted.
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);
/// Placeholder color for invalid colors and missing sprites.
pub const MAGENTA: Color = Rgba([255, 0, 255, 255]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
/// Fallback block color for actors whose sprite is missing.
pub const RED: Color = Rgba([255, 0, 0, 255]);

/// Wall color used when a scene does not declare one (`#CCCCFF`).
pub const DEFAULT_WALL: Color = Rgba([0xCC, 0xCC, 0xFF, 255]);
/// Floor color used when a scene does not declare one (`#885500`).
pub const DEFAULT_FLOOR: Color = Rgba([0x88, 0x55, 0x00, 255]);

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex colors take a fast path; everything else goes through lightningcss.
///
/// ```
/// use pixelroom::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("transparent").unwrap()[3], 0);
/// ```
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex_color(hex),
        None => parse_css_color(s),
    }
}

fn parse_hex_color(hex: &str) -> Result<Color, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
    match digits.len() {
        3 | 4 => {
            let mut out = [255u8; 4];
            for (slot, d) in out.iter_mut().zip(&digits) {
                *slot = d * 17;
            }
            Ok(Rgba(out))
        }
        6 | 8 => {
            let mut out = [255u8; 4];
            for (slot, pair) in out.iter_mut().zip(digits.chunks(2)) {
                *slot = pair[0] * 16 + pair[1];
            }
            Ok(Rgba(out))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

fn parse_css_color(s: &str) -> Result<Color, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
                Ok(Rgba([channel(rgb.r), channel(rgb.g), channel(rgb.b), channel(rgb.alpha)]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// True for any fully transparent color.
pub fn is_transparent(color: Color) -> bool {
    color[3] == 0
}

/// Shift every color channel by `amount`, clamped to 0..=255. Alpha is kept.
pub fn adjust_brightness(color: Color, amount: i32) -> Color {
    let shift = |c: u8| (i32::from(c) + amount).clamp(0, 255) as u8;
    Rgba([shift(color[0]), shift(color[1]), shift(color[2]), color[3]])
}

/// Lighten by `percent` of the full channel range.
pub fn lighten(color: Color, percent: f64) -> Color {
    adjust_brightness(color, (2.55 * percent).round() as i32)
}

/// Darken by `percent` of the full channel range.
pub fn darken(color: Color, percent: f64) -> Color {
    adjust_brightness(color, -(2.55 * percent).round() as i32)
}

/// Same color with its alpha multiplied by `opacity` (0.0..=1.0).
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    let a = (f32::from(color[3]) * opacity.clamp(0.0, 1.0)).round() as u8;
    Rgba([color[0], color[1], color[2], a])
}

/// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
pub fn to_hex(color: Color) -> String {
    if color[3] == 255 {
        format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", color[0], color[1], color[2], color[3])
    }
}
