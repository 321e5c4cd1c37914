//! Pseudo-3D room painting: isometric offsets, depth scaling and shadows
//!
//! The "3D" look is a 2D illusion. Things lower on the surface (larger `y`)
//! are closer to the viewer and so drawn larger and later. Raised props are
//! shifted up by their height and cast a shadow on the floor beneath them.

use image::RgbaImage;

use crate::catalog::SpriteCatalog;
use crate::color::{darken, lighten, Color, BLACK, MAGENTA, WHITE};
use crate::models::{SceneElement, Warning};
use crate::scene::{Background, Scene};
use crate::sprite::Sprite;
use crate::surface::Surface;

/// Default pixel scale for sprites before depth adjustment.
pub const DEFAULT_BASE_SCALE: f64 = 4.0;
/// Depth scale multiplier at the top of the surface.
pub const FAR_SCALE: f64 = 0.6;
/// Depth scale multiplier at the bottom of the surface.
pub const NEAR_SCALE: f64 = 1.2;

/// Where the back wall meets the floor, as a fraction of height.
pub const FLOOR_LINE: f64 = 0.75;
/// Horizontal extent of each side wall, as a fraction of width.
pub const SIDE_WALL: f64 = 0.3;
/// Top edge of the back wall, as a fraction of height.
pub const BACK_WALL_TOP: f64 = 0.2;

pub const SHADOW_ALPHA: f32 = 0.3;
pub const SHADOW_SCALE: f64 = 0.8;
/// Shadow offset for things with no declared height.
pub const FLAT_SHADOW_OFFSET: (f64, f64) = (4.0, 2.0);

pub const PLACEHOLDER_SIZE: f64 = 20.0;

/// Project a scene position onto the surface.
///
/// `iso_x = x - 0.5·y`, `iso_y = 0.25·y - z`.
pub fn to_isometric(x: f64, y: f64, z: f64) -> (f64, f64) {
    (x - y * 0.5, y * 0.25 - z)
}

/// Pixel scale for something standing at `y` on a surface `surface_height` tall.
///
/// Linear from `0.6·base` at the top to `1.2·base` at the bottom; `y` outside
/// the surface is clamped.
pub fn scale_for_depth(y: f64, base: f64, surface_height: f64) -> f64 {
    let t = if surface_height > 0.0 { (y / surface_height).clamp(0.0, 1.0) } else { 0.0 };
    base * (FAR_SCALE + (NEAR_SCALE - FAR_SCALE) * t)
}

/// Paint a sprite's silhouette as a translucent black shadow.
pub fn render_shadow(surface: &mut Surface, sprite: &Sprite, x: f64, y: f64, scale: f64) {
    surface.with_alpha(SHADOW_ALPHA, |s| sprite.render_tinted(s, x, y, scale * SHADOW_SCALE, Some(BLACK)));
}

/// Render a sprite with an optional shadow beneath it, offset by `shadow`.
pub fn render_with_shadow(
    surface: &mut Surface,
    sprite: &Sprite,
    x: f64,
    y: f64,
    scale: f64,
    shadow: Option<(f64, f64)>,
) {
    if let Some((dx, dy)) = shadow {
        render_shadow(surface, sprite, x + dx, y + dy, scale);
    }
    sprite.render(surface, x, y, scale);
}

/// Left, right and back wall polygons down to the floor line.
pub fn draw_walls(surface: &mut Surface, wall_color: Color) {
    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    let floor_y = h * FLOOR_LINE;
    let (left_x, right_x, top_y) = (w * SIDE_WALL, w * (1.0 - SIDE_WALL), h * BACK_WALL_TOP);

    surface.fill_polygon(&[(0.0, 0.0), (left_x, top_y), (left_x, floor_y), (0.0, floor_y)], darken(wall_color, 15.0));
    surface.fill_polygon(&[(w, 0.0), (right_x, top_y), (right_x, floor_y), (w, floor_y)], darken(wall_color, 30.0));
    surface.fill_polygon(
        &[(left_x, top_y), (right_x, top_y), (right_x, floor_y), (left_x, floor_y)],
        wall_color,
    );
}

/// Floor band below the floor line with a converging grid.
pub fn draw_floor(surface: &mut Surface, floor_color: Color) {
    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    let floor_y = h * FLOOR_LINE;
    let depth = h - floor_y;

    surface.fill_rect(0.0, floor_y, w, depth, floor_color);

    let grid = darken(floor_color, 15.0);
    for i in 0..=5 {
        let t = f64::from(i) / 5.0;
        let y = floor_y + depth * t;
        let inset = t * w * 0.2;
        surface.draw_line((inset, y), (w - inset, y), grid, 1);
    }
    for i in 0..=10 {
        let x = w * f64::from(i) / 10.0;
        let end_offset = (f64::from(i) - 5.0).abs() / 5.0 * depth * 0.5;
        surface.draw_line((x, floor_y), (x, h - end_offset), grid, 1);
    }
}

/// A box with a lighter top face and darker side face.
pub fn draw_box_3d(surface: &mut Surface, x: f64, y: f64, width: f64, height: f64, depth: f64, color: Color) {
    let (dx, dy) = (depth * 0.5, depth * 0.25);
    surface.fill_polygon(
        &[(x, y), (x + width, y), (x + width - dx, y - dy), (x - dx, y - dy)],
        lighten(color, 30.0),
    );
    surface.fill_rect(x, y, width, height, color);
    surface.fill_polygon(
        &[(x + width, y), (x + width, y + height), (x + width - dx, y + height - dy), (x + width - dx, y - dy)],
        darken(color, 30.0),
    );
}

/// Magenta square with the missing id written above it.
pub fn draw_placeholder(surface: &mut Surface, x: f64, y: f64, label: &str) {
    surface.fill_rect(x, y, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, MAGENTA);
    surface.draw_text(label, x, y - 2.0, WHITE, 1);
}

/// Paints room shells and static elements using sprites from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveRenderer<'a> {
    catalog: &'a SpriteCatalog,
    base_scale: f64,
}

impl<'a> PerspectiveRenderer<'a> {
    pub fn new(catalog: &'a SpriteCatalog) -> Self {
        Self { catalog, base_scale: DEFAULT_BASE_SCALE }
    }

    pub fn with_base_scale(mut self, base_scale: f64) -> Self {
        self.base_scale = base_scale;
        self
    }

    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    /// Depth scale for this renderer's surface.
    pub fn scale_at(&self, surface: &Surface, y: f64, base: Option<f64>) -> f64 {
        scale_for_depth(y, base.unwrap_or(self.base_scale), f64::from(surface.height()))
    }

    /// Clear and paint the room: backdrop or walls and floor, then elements.
    ///
    /// `backdrop` is the decoded background image, when one is in effect.
    pub fn draw_room(
        &self,
        surface: &mut Surface,
        scene: &Scene,
        backdrop: Option<&RgbaImage>,
        warnings: &mut Vec<Warning>,
    ) {
        surface.clear();
        match backdrop {
            Some(image) => {
                let (w, h) = (f64::from(surface.width()), f64::from(surface.height()));
                surface.draw_image(image, 0.0, 0.0, w, h);
            }
            None => {
                let base = match scene.background {
                    Some(Background::Color(c)) => c,
                    _ => scene.wall_color,
                };
                surface.fill(base);
                draw_walls(surface, scene.wall_color);
                draw_floor(surface, scene.floor_color);
            }
        }
        self.draw_elements(surface, &scene.elements, warnings);
    }

    /// Draw elements back to front by ascending `y`. Equal `y` keeps declaration order.
    pub fn draw_elements(&self, surface: &mut Surface, elements: &[SceneElement], warnings: &mut Vec<Warning>) {
        let mut sorted: Vec<&SceneElement> = elements.iter().collect();
        sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
        for element in sorted {
            self.draw_element(surface, element, warnings);
        }
    }

    pub fn draw_element(&self, surface: &mut Surface, element: &SceneElement, warnings: &mut Vec<Warning>) {
        let Some(sprite) = self.catalog.get(&element.sprite) else {
            let w = Warning::new(format!("Sprite '{}' not found, drawing placeholder", element.sprite));
            log::warn!("{}", w);
            warnings.push(w);
            draw_placeholder(surface, element.x, element.y, &element.sprite);
            return;
        };

        let scale = self.scale_at(surface, element.y, element.scale);
        match element.height {
            Some(height) => {
                let (dx, dy) = to_isometric(0.0, 0.0, height);
                if element.casts_shadow() {
                    render_shadow(surface, sprite, element.x + height * 0.2, element.y + height * 0.1, scale);
                }
                sprite.render(surface, element.x + dx, element.y + dy, scale);
            }
            None => {
                let shadow = element.casts_shadow().then_some(FLAT_SHADOW_OFFSET);
                render_with_shadow(surface, sprite, element.x, element.y, scale, shadow);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{DEFAULT_FLOOR, DEFAULT_WALL, RED, TRANSPARENT};
    use image::Rgba;

    const BLUE: Color = Rgba([0, 0, 255, 255]);

    fn block(color: Color) -> Sprite {
        Sprite::new(vec![vec![color; 10]; 10])
    }

    fn flat(sprite: &str, x: f64, y: f64, scale: f64) -> SceneElement {
        SceneElement { scale: Some(scale), cast_shadow: Some(false), ..SceneElement::new(sprite, x, y) }
    }

    #[test]
    fn test_to_isometric() {
        assert_eq!(to_isometric(10.0, 20.0, 5.0), (0.0, 0.0));
        assert_eq!(to_isometric(0.0, 0.0, 12.0), (0.0, -12.0));
    }

    #[test]
    fn test_scale_for_depth_range() {
        assert!((scale_for_depth(0.0, 4.0, 400.0) - 2.4).abs() < 1e-9);
        assert!((scale_for_depth(400.0, 4.0, 400.0) - 4.8).abs() < 1e-9);
        assert!((scale_for_depth(200.0, 4.0, 400.0) - 3.6).abs() < 1e-9);
        assert_eq!(scale_for_depth(-50.0, 4.0, 400.0), scale_for_depth(0.0, 4.0, 400.0));
        assert_eq!(scale_for_depth(900.0, 4.0, 400.0), scale_for_depth(400.0, 4.0, 400.0));
    }

    #[test]
    fn test_walls_and_floor_colors() {
        let mut s = Surface::new(100, 100);
        draw_walls(&mut s, DEFAULT_WALL);
        draw_floor(&mut s, DEFAULT_FLOOR);
        assert_eq!(s.pixel(50, 50), Some(DEFAULT_WALL));
        assert_eq!(s.pixel(5, 50), Some(darken(DEFAULT_WALL, 15.0)));
        assert_eq!(s.pixel(95, 50), Some(darken(DEFAULT_WALL, 30.0)));
        assert_eq!(s.pixel(52, 87), Some(DEFAULT_FLOOR));
        // Grid line at the floor line
        assert_eq!(s.pixel(50, 75), Some(darken(DEFAULT_FLOOR, 15.0)));
    }

    #[test]
    fn test_depth_sort_larger_y_on_top() {
        let mut catalog = SpriteCatalog::new();
        catalog.register("red", block(RED));
        catalog.register("blue", block(BLUE));
        let renderer = PerspectiveRenderer::new(&catalog);

        let mut s = Surface::new(100, 100);
        let mut warnings = Vec::new();
        let elements = [flat("red", 0.0, 50.0, 10.0), flat("blue", 0.0, 10.0, 10.0)];
        renderer.draw_elements(&mut s, &elements, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(s.pixel(5, 60), Some(RED));
        assert_eq!(s.pixel(5, 20), Some(BLUE));
    }

    #[test]
    fn test_equal_y_keeps_declaration_order() {
        let mut catalog = SpriteCatalog::new();
        catalog.register("red", block(RED));
        catalog.register("blue", block(BLUE));
        let renderer = PerspectiveRenderer::new(&catalog);

        let mut s = Surface::new(50, 50);
        let elements = [flat("red", 0.0, 0.0, 1.0), flat("blue", 0.0, 0.0, 1.0)];
        renderer.draw_elements(&mut s, &elements, &mut Vec::new());
        assert_eq!(s.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn test_missing_sprite_draws_placeholder() {
        let catalog = SpriteCatalog::new();
        let renderer = PerspectiveRenderer::new(&catalog);
        let mut s = Surface::new(60, 60);
        let mut warnings = Vec::new();
        renderer.draw_element(&mut s, &SceneElement::new("ghost", 20.0, 20.0), &mut warnings);
        assert_eq!(s.pixel(25, 25), Some(MAGENTA));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("ghost"));
    }

    #[test]
    fn test_raised_element_and_shadow() {
        let mut catalog = SpriteCatalog::new();
        catalog.register("dot", Sprite::new(vec![vec![RED]]));
        let renderer = PerspectiveRenderer::new(&catalog);

        let mut s = Surface::new(100, 100);
        let mut e = SceneElement::new("dot", 40.0, 50.0);
        e.scale = Some(10.0);
        e.height = Some(20.0);
        renderer.draw_element(&mut s, &e, &mut Vec::new());

        // Raised by its height
        assert_eq!(s.pixel(42, 32), Some(RED));
        // Shadow on the floor at (x + 0.2h, y + 0.1h)
        let shadow = s.pixel(45, 53).unwrap();
        assert_eq!((shadow[0], shadow[1], shadow[2]), (0, 0, 0));
        assert!(shadow[3] > 60 && shadow[3] < 90);
    }

    #[test]
    fn test_cast_shadow_false() {
        let mut catalog = SpriteCatalog::new();
        catalog.register("dot", Sprite::new(vec![vec![RED]]));
        let renderer = PerspectiveRenderer::new(&catalog);
        let mut s = Surface::new(40, 40);
        renderer.draw_element(&mut s, &flat("dot", 10.0, 10.0, 4.0), &mut Vec::new());
        assert_eq!(s.pixel(15, 13), Some(TRANSPARENT));
    }

    #[test]
    fn test_draw_box_3d_faces() {
        let mut s = Surface::new(60, 60);
        draw_box_3d(&mut s, 20.0, 20.0, 20.0, 20.0, 16.0, RED);
        assert_eq!(s.pixel(25, 30), Some(RED));
        assert_eq!(s.pixel(20, 17), Some(lighten(RED, 30.0)));
    }
}
