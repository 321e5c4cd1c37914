//! Raster drawing surface that sprites and room shells paint into
//!
//! All drawing composites source-over onto an `RgbaImage`. Coordinates are
//! floating point so perspective-scaled geometry can be passed straight
//! through; fills snap their edges to whole pixels by rounding.

use std::collections::BTreeSet;

use image::{Rgba, RgbaImage};

use crate::color::{Color, TRANSPARENT};
use crate::font;

/// A drawing target with a global alpha multiplier, like a 2D canvas context.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
    alpha: f32,
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height), alpha: 1.0 }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read back a pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// True if nothing has been painted.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = TRANSPARENT;
        }
    }

    /// Reallocate at a new size. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    pub fn global_alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Run `draw` with the global alpha temporarily multiplied by `alpha`.
    pub fn with_alpha<R>(&mut self, alpha: f32, draw: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.alpha;
        self.set_global_alpha(saved * alpha);
        let out = draw(self);
        self.alpha = saved;
        out
    }

    /// Composite `color` over the whole surface.
    pub fn fill(&mut self, color: Color) {
        self.fill_rect(0.0, 0.0, f64::from(self.width()), f64::from(self.height()), color);
    }

    /// Fill an axis-aligned rectangle. Edges are rounded to whole pixels.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if w <= 0.0 || h <= 0.0 || color[3] == 0 {
            return;
        }
        let (x0, x1) = self.clamp_x(x.round(), (x + w).round());
        let (y0, y1) = self.clamp_y(y.round(), (y + h).round());
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    /// Fill a simple polygon using even-odd scanline sampling at pixel centers.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 || color[3] == 0 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let (y0, y1) = self.clamp_y(min_y.floor(), max_y.ceil());

        let mut crossings = Vec::with_capacity(points.len());
        for py in y0..y1 {
            let sy = f64::from(py) + 0.5;
            crossings.clear();
            for (i, &(ax, ay)) in points.iter().enumerate() {
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                    crossings.push(ax + (sy - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let (x0, x1) = self.clamp_x((span[0] - 0.5).ceil(), (span[1] - 0.5).ceil());
                for px in x0..x1 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Stroke a straight line `width` pixels thick.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: u32) {
        let mut covered = BTreeSet::new();
        plot_line(&mut covered, from, to, width);
        self.blend_all(&covered, color);
    }

    /// Stroke a rectangle outline. Corners are painted once.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, width: u32) {
        let mut covered = BTreeSet::new();
        let (l, t, r, b) = (x, y, x + w, y + h);
        plot_line(&mut covered, (l, t), (r, t), width);
        plot_line(&mut covered, (r, t), (r, b), width);
        plot_line(&mut covered, (r, b), (l, b), width);
        plot_line(&mut covered, (l, b), (l, t), width);
        self.blend_all(&covered, color);
    }

    /// Fill a disc centered at `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if radius <= 0.0 || color[3] == 0 {
            return;
        }
        let (x0, x1) = self.clamp_x((cx - radius).floor(), (cx + radius).ceil());
        let (y0, y1) = self.clamp_y((cy - radius).floor(), (cy + radius).ceil());
        let r2 = radius * radius;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = f64::from(px) + 0.5 - cx;
                let dy = f64::from(py) + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Draw `source` stretched into the rectangle with nearest-neighbor sampling.
    pub fn draw_image(&mut self, source: &RgbaImage, x: f64, y: f64, w: f64, h: f64) {
        if w <= 0.0 || h <= 0.0 || source.width() == 0 || source.height() == 0 {
            return;
        }
        let left = x.round();
        let top = y.round();
        let (x0, x1) = self.clamp_x(left, (x + w).round());
        let (y0, y1) = self.clamp_y(top, (y + h).round());
        let sx_ratio = f64::from(source.width()) / w;
        let sy_ratio = f64::from(source.height()) / h;
        for py in y0..y1 {
            let sy = ((f64::from(py) - top + 0.5) * sy_ratio) as u32;
            let sy = sy.min(source.height() - 1);
            for px in x0..x1 {
                let sx = ((f64::from(px) - left + 0.5) * sx_ratio) as u32;
                let sx = sx.min(source.width() - 1);
                let src = *source.get_pixel(sx, sy);
                self.blend(px, py, src);
            }
        }
    }

    /// Draw bitmap text with its baseline at `y`.
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color, scale: u32) {
        font::draw_text(self, text, x, y, color, scale);
    }

    /// Draw bitmap text horizontally centered on `cx`.
    pub fn draw_text_centered(&mut self, text: &str, cx: f64, y: f64, color: Color, scale: u32) {
        let w = f64::from(font::text_width(text, scale));
        font::draw_text(self, text, cx - w / 2.0, y, color, scale);
    }

    fn clamp_x(&self, start: f64, end: f64) -> (u32, u32) {
        clamp_span(start, end, self.width())
    }

    fn clamp_y(&self, start: f64, end: f64) -> (u32, u32) {
        clamp_span(start, end, self.height())
    }

    fn blend_all(&mut self, covered: &BTreeSet<(i64, i64)>, color: Color) {
        for &(px, py) in covered {
            if px >= 0 && py >= 0 && px < i64::from(self.width()) && py < i64::from(self.height()) {
                self.blend(px as u32, py as u32, color);
            }
        }
    }

    /// Source-over composite of one pixel, scaled by the global alpha.
    pub(crate) fn blend(&mut self, x: u32, y: u32, src: Color) {
        let src_alpha = f32::from(src[3]) / 255.0 * self.alpha;
        if src_alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        *dst = blend_pixels(src, *dst, src_alpha);
    }
}

fn clamp_span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let limit = f64::from(limit);
    let s = start.clamp(0.0, limit) as u32;
    let e = end.clamp(0.0, limit) as u32;
    (s, e.max(s))
}

/// Collect the pixels a thick line covers, so overlapping strokes blend once.
fn plot_line(covered: &mut BTreeSet<(i64, i64)>, from: (f64, f64), to: (f64, f64), width: u32) {
    let width = i64::from(width.max(1));
    let lead = (width - 1) / 2;
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let cx = (from.0 + dx * t).floor() as i64;
        let cy = (from.1 + dy * t).floor() as i64;
        for oy in 0..width {
            for ox in 0..width {
                covered.insert((cx - lead + ox, cy - lead + oy));
            }
        }
    }
}

/// Porter-Duff "source over" for straight (non-premultiplied) RGBA.
pub(crate) fn blend_pixels(src: Color, dst: Color, src_alpha: f32) -> Color {
    if src_alpha >= 1.0 {
        return Rgba([src[0], src[1], src[2], 255]);
    }
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return TRANSPARENT;
    }

    let channel = |s: u8, d: u8| {
        let s = f32::from(s) / 255.0;
        let d = f32::from(d) / 255.0;
        let c = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
