//! Per-frame room rendering
//!
//! [`RoomRenderer`] is either idle or bound to one scene id. Each render
//! paints, in order: the room shell and depth-sorted elements, depth-sorted
//! NPCs, the player, and (when enabled) the debug overlay.
//!
//! Elements and NPCs are sorted independently, so an NPC always draws over
//! every element even when the element stands closer to the viewer.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::catalog::SpriteCatalog;
use crate::color::{Color, BLACK, RED, WHITE};
use crate::models::{Actor, Warning};
use crate::perspective::{render_shadow, render_with_shadow, PerspectiveRenderer, DEFAULT_BASE_SCALE};
use crate::provider::{DecodeTicket, ImageHandle, ImageProvider, ProviderError};
use crate::scene::{Scene, SceneRegistry};
use crate::surface::Surface;

/// Distance from the bottom of the surface to the player's top edge.
pub const DEFAULT_PLAYER_BASELINE: f64 = 100.0;
pub const NPC_SHADOW_OFFSET: (f64, f64) = (5.0, 2.0);
pub const PLAYER_SHADOW_OFFSET: (f64, f64) = (4.0, 2.0);
/// Label used for NPCs without a name when names are forced on.
pub const DEFAULT_NPC_LABEL: &str = "NPC";

const HOTSPOT_OUTLINE: Color = Rgba([255, 255, 0, 128]);
const HOTSPOT_LABEL: Color = Rgba([255, 255, 0, 179]);
const EXIT_MARKER: Color = Rgba([100, 255, 100, 51]);
const EXIT_LABEL: Color = Rgba([255, 255, 255, 204]);
const EXIT_RADIUS: f64 = 15.0;

/// Error type for room rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("scene '{0}' not found")]
    SceneNotFound(String),
}

/// Which way the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Front,
    Left,
    Right,
    Back,
}

impl Facing {
    /// Catalog id of the sprite for this facing.
    pub fn sprite_id(&self) -> &'static str {
        match self {
            Facing::Front => "player",
            Facing::Left => "player-left",
            Facing::Right => "player-right",
            Facing::Back => "player-back",
        }
    }
}

/// Where the player stands and how they are animated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub x: f64,
    pub facing: Facing,
    pub walking: bool,
    pub walk_frame: u32,
}

impl PlayerState {
    pub fn at(x: f64) -> Self {
        Self { x, ..Default::default() }
    }
}

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Draw hotspot outlines and exit markers.
    pub debug: bool,
    /// Label every NPC, using `NPC` for unnamed ones.
    pub show_names: bool,
    pub base_scale: f64,
    pub player_baseline: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            debug: false,
            show_names: false,
            base_scale: DEFAULT_BASE_SCALE,
            player_baseline: DEFAULT_PLAYER_BASELINE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomState {
    Idle,
    Bound(String),
}

/// What happened while producing a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub scene_id: String,
    pub warnings: Vec<Warning>,
    /// The background is still decoding; the flat shell was painted instead.
    pub background_pending: bool,
}

/// The one outstanding background decode.
#[derive(Debug, Clone)]
struct PendingPaint {
    ticket: DecodeTicket,
    scene_id: String,
    generation: u64,
}

/// Renders scenes from a registry into an owned surface.
pub struct RoomRenderer<'a> {
    catalog: &'a SpriteCatalog,
    scenes: &'a SceneRegistry,
    provider: &'a dyn ImageProvider,
    surface: Surface,
    state: RoomState,
    options: RenderOptions,
    player: Option<PlayerState>,
    pending: Option<PendingPaint>,
    generation: u64,
}

impl<'a> RoomRenderer<'a> {
    pub fn new(
        catalog: &'a SpriteCatalog,
        scenes: &'a SceneRegistry,
        provider: &'a dyn ImageProvider,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            catalog,
            scenes,
            provider,
            surface: Surface::new(width, height),
            state: RoomState::Idle,
            options: RenderOptions::default(),
            player: None,
            pending: None,
            generation: 0,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Changes take effect on the next render.
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    pub fn set_player(&mut self, player: Option<PlayerState>) {
        self.player = player;
    }

    pub fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn bound_scene(&self) -> Option<&str> {
        match &self.state {
            RoomState::Bound(id) => Some(id),
            RoomState::Idle => None,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The most recently painted frame.
    pub fn frame(&self) -> &RgbaImage {
        self.surface.image()
    }

    /// Bind to `id` and paint it.
    ///
    /// On an unknown id nothing is drawn and the previous binding is kept.
    pub fn render_room(&mut self, id: &str) -> Result<FrameReport, RenderError> {
        let scenes = self.scenes;
        let Some(scene) = scenes.get_scene(id) else {
            log::error!("scene '{}' not found", id);
            return Err(RenderError::SceneNotFound(id.to_string()));
        };
        if self.bound_scene() != Some(id) {
            log::debug!("room renderer bound to '{}'", id);
            self.state = RoomState::Bound(id.to_string());
        }
        Ok(self.render_bound(scene))
    }

    /// Repaint the bound scene. `None` while idle.
    pub fn rerender(&mut self) -> Option<FrameReport> {
        let scenes = self.scenes;
        let scene = scenes.get_scene(self.bound_scene()?)?;
        Some(self.render_bound(scene))
    }

    /// Resize the surface and repaint the bound scene, if any.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<FrameReport> {
        self.surface.resize(width, height);
        self.rerender()
    }

    /// Finish a deferred background decode.
    ///
    /// Repaints with the image only if the ticket belongs to the latest
    /// render of the bound scene; stale tickets are ignored and return `None`.
    /// A failed decode keeps the flat shell and reports the failure along
    /// with the frame's own warnings.
    pub fn complete_decode(
        &mut self,
        ticket: DecodeTicket,
        result: Result<Arc<RgbaImage>, ProviderError>,
    ) -> Option<FrameReport> {
        let current = match (&self.pending, &self.state) {
            (Some(p), RoomState::Bound(id)) => {
                p.ticket == ticket && p.scene_id == *id && p.generation == self.generation
            }
            _ => false,
        };
        if !current {
            log::debug!("dropping stale decode for ticket {}", ticket.0);
            return None;
        }

        let pending = self.pending.take()?;
        let scenes = self.scenes;
        let scene = scenes.get_scene(&pending.scene_id)?;
        match result {
            Ok(image) => Some(self.paint(scene, Some(&image), Vec::new())),
            Err(e) => {
                let w = Warning::new(format!("Background for scene '{}' failed to load: {}", scene.id, e));
                log::warn!("{}", w);
                Some(self.paint(scene, None, vec![w]))
            }
        }
    }

    fn render_bound(&mut self, scene: &Scene) -> FrameReport {
        self.generation += 1;
        self.pending = None;

        let mut warnings = Vec::new();
        let mut background_pending = false;
        let backdrop = match scene.background_image() {
            None => None,
            Some(reference) => match self.provider.request(reference) {
                Ok(ImageHandle::Ready(image)) => Some(image),
                Ok(ImageHandle::Pending(ticket)) => {
                    self.pending = Some(PendingPaint {
                        ticket,
                        scene_id: scene.id.clone(),
                        generation: self.generation,
                    });
                    background_pending = true;
                    None
                }
                Ok(ImageHandle::Missing) => {
                    warnings.push(Warning::new(format!("Background image '{}' not found", reference)));
                    None
                }
                Err(e) => {
                    warnings.push(Warning::new(format!("Background image '{}' failed to load: {}", reference, e)));
                    None
                }
            },
        };
        for w in &warnings {
            log::warn!("{}", w);
        }

        let mut report = self.paint(scene, backdrop.as_deref(), warnings);
        report.background_pending = background_pending;
        report
    }

    fn paint(&mut self, scene: &Scene, backdrop: Option<&RgbaImage>, mut warnings: Vec<Warning>) -> FrameReport {
        let perspective = PerspectiveRenderer::new(self.catalog).with_base_scale(self.options.base_scale);
        perspective.draw_room(&mut self.surface, scene, backdrop, &mut warnings);
        self.draw_npcs(&perspective, &scene.npcs, &mut warnings);
        self.draw_player(&perspective, &mut warnings);
        if self.options.debug {
            self.draw_debug_overlay(scene);
        }
        FrameReport { scene_id: scene.id.clone(), warnings, background_pending: false }
    }

    fn draw_npcs(&mut self, perspective: &PerspectiveRenderer<'_>, npcs: &[Actor], warnings: &mut Vec<Warning>) {
        let mut sorted: Vec<&Actor> = npcs.iter().collect();
        sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

        for npc in sorted {
            let Some(sprite) = self.catalog.get(&npc.sprite) else {
                let w = Warning::new(format!("NPC sprite '{}' not found, drawing fallback block", npc.sprite));
                log::warn!("{}", w);
                warnings.push(w);
                self.surface.fill_rect(npc.x, npc.y, 20.0, 40.0, RED);
                continue;
            };

            let scale = perspective.scale_at(&self.surface, npc.y, npc.scale);
            let shadow = npc.casts_shadow().then_some(NPC_SHADOW_OFFSET);
            render_with_shadow(&mut self.surface, sprite, npc.x, npc.y, scale, shadow);

            if npc.name.is_some() || self.options.show_names {
                let label = npc.name.as_deref().unwrap_or(DEFAULT_NPC_LABEL);
                self.surface.draw_text_centered(label, npc.x + 16.0, npc.y - 6.0, BLACK, 1);
                self.surface.draw_text_centered(label, npc.x + 16.0, npc.y - 5.0, WHITE, 1);
            }
        }
    }

    fn draw_player(&mut self, perspective: &PerspectiveRenderer<'_>, warnings: &mut Vec<Warning>) {
        let Some(player) = self.player else {
            return;
        };
        let y = f64::from(self.surface.height()) - self.options.player_baseline;
        let id = player.facing.sprite_id();

        let Some(sprite) = self.catalog.get(id) else {
            let w = Warning::new(format!("Player sprite '{}' not found, drawing fallback block", id));
            log::warn!("{}", w);
            warnings.push(w);
            self.surface.fill_rect(player.x, y - 32.0, 32.0, 32.0, RED);
            return;
        };

        let scale = perspective.scale_at(&self.surface, y, None);
        let bob = if player.walking { f64::from(player.walk_frame % 2) * 2.0 } else { 0.0 };
        let (dx, dy) = PLAYER_SHADOW_OFFSET;
        render_shadow(&mut self.surface, sprite, player.x + dx, y + dy, scale);
        sprite.render(&mut self.surface, player.x, y - bob, scale);
    }

    fn draw_debug_overlay(&mut self, scene: &Scene) {
        for hotspot in &scene.hotspots {
            self.surface.stroke_rect(hotspot.x, hotspot.y, hotspot.width, hotspot.height, HOTSPOT_OUTLINE, 2);
            self.surface.draw_text(&hotspot.name, hotspot.x, hotspot.y - 2.0, HOTSPOT_LABEL, 1);
        }
        for (destination, at) in &scene.exits {
            self.surface.fill_circle(at.x, at.y, EXIT_RADIUS, EXIT_MARKER);
            let label = format!("TO: {}", destination);
            self.surface.draw_text_centered(&label, at.x, at.y + 30.0, EXIT_LABEL, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{MAGENTA, TRANSPARENT};
    use crate::models::{Hotspot, Point, SceneElement};
    use crate::provider::{CatalogProvider, DeferredProvider};
    use crate::scene::SceneConfig;
    use crate::sprite::Sprite;

    const GREEN: Color = Rgba([0, 200, 0, 255]);

    fn catalog() -> SpriteCatalog {
        let mut catalog = SpriteCatalog::new();
        catalog.register("block", Sprite::new(vec![vec![GREEN; 4]; 4]));
        catalog.register("backdrop", Sprite::new(vec![vec![MAGENTA; 2]; 2]));
        catalog
    }

    fn scenes() -> SceneRegistry {
        let mut scenes = SceneRegistry::new();
        scenes.register_scene("plain", SceneConfig::default());
        scenes.register_scene(
            "imaged",
            SceneConfig {
                background: Some(crate::scene::BackgroundDef::Image("backdrop".into())),
                ..Default::default()
            },
        );
        scenes
    }

    #[test]
    fn test_starts_idle() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 64, 40);
        assert_eq!(renderer.state(), &RoomState::Idle);
        assert!(renderer.rerender().is_none());
        assert!(renderer.resize(32, 32).is_none());
        assert!(renderer.surface().is_blank());
    }

    #[test]
    fn test_render_binds_and_paints() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 64, 40);
        let report = renderer.render_room("plain").unwrap();
        assert_eq!(report.scene_id, "plain");
        assert!(report.warnings.is_empty());
        assert_eq!(renderer.state(), &RoomState::Bound("plain".into()));
        assert!(!renderer.surface().is_blank());
    }

    #[test]
    fn test_unknown_scene_keeps_state() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 64, 40);
        renderer.render_room("plain").unwrap();
        let before = renderer.frame().clone();

        let err = renderer.render_room("nowhere").unwrap_err();
        assert_eq!(err, RenderError::SceneNotFound("nowhere".into()));
        assert_eq!(renderer.bound_scene(), Some("plain"));
        assert_eq!(renderer.frame(), &before);
    }

    #[test]
    fn test_resize_rerenders() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 64, 40);
        renderer.render_room("plain").unwrap();
        let report = renderer.resize(100, 80).unwrap();
        assert_eq!(report.scene_id, "plain");
        assert_eq!(renderer.frame().dimensions(), (100, 80));
        assert!(!renderer.surface().is_blank());
    }

    #[test]
    fn test_background_image_replaces_shell() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 40, 40);
        renderer.render_room("imaged").unwrap();
        assert_eq!(renderer.surface().pixel(20, 5), Some(MAGENTA));
        assert_eq!(renderer.surface().pixel(20, 35), Some(MAGENTA));
    }

    #[test]
    fn test_missing_background_warns_and_uses_shell() {
        let catalog = SpriteCatalog::new();
        let scenes = scenes();
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 40, 40);
        let report = renderer.render_room("imaged").unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("backdrop"));
        assert!(!renderer.surface().is_blank());
    }

    #[test]
    fn test_deferred_background_completes() {
        let (catalog, scenes) = (catalog(), scenes());
        let inner = CatalogProvider::new(&catalog);
        let provider = DeferredProvider::new(inner);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 40, 40);

        let report = renderer.render_room("imaged").unwrap();
        assert!(report.background_pending);
        assert_ne!(renderer.surface().pixel(20, 5), Some(MAGENTA));

        let (ticket, result) = provider.poll_ready().pop().unwrap();
        let done = renderer.complete_decode(ticket, result).unwrap();
        assert!(!done.background_pending);
        assert_eq!(renderer.surface().pixel(20, 5), Some(MAGENTA));
    }

    #[test]
    fn test_failed_decode_keeps_frame_warnings() {
        let catalog = catalog();
        let mut scenes = SceneRegistry::new();
        scenes.register_scene(
            "imaged",
            SceneConfig {
                background: Some(crate::scene::BackgroundDef::Image("backdrop".into())),
                elements: vec![SceneElement::new("unknown", 5.0, 5.0)],
                ..Default::default()
            },
        );
        let provider = DeferredProvider::new(CatalogProvider::new(&catalog));
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 40, 40);

        let first = renderer.render_room("imaged").unwrap();
        assert_eq!(first.warnings.len(), 1);

        let (ticket, _) = provider.poll_ready().pop().unwrap();
        let failure = ProviderError::Io {
            path: "backdrop.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let report = renderer.complete_decode(ticket, Err(failure)).unwrap();
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].message.contains("failed to load"));
        assert!(report.warnings[1].message.contains("unknown"));
        assert!(!report.background_pending);
        assert_ne!(renderer.surface().pixel(35, 2), Some(MAGENTA));
    }

    #[test]
    fn test_stale_decode_is_dropped() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = DeferredProvider::new(CatalogProvider::new(&catalog));
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 40, 40);

        renderer.render_room("imaged").unwrap();
        renderer.render_room("plain").unwrap();
        let before = renderer.frame().clone();

        let (ticket, result) = provider.poll_ready().pop().unwrap();
        assert!(renderer.complete_decode(ticket, result).is_none());
        assert_eq!(renderer.frame(), &before);
    }

    #[test]
    fn test_superseded_render_of_same_scene_drops_old_ticket() {
        let (catalog, scenes) = (catalog(), scenes());
        let provider = DeferredProvider::new(CatalogProvider::new(&catalog));
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 40, 40);

        renderer.render_room("imaged").unwrap();
        renderer.render_room("imaged").unwrap();
        let mut ready = provider.poll_ready();
        let (newest, result) = ready.pop().unwrap();
        let (oldest, stale) = ready.pop().unwrap();
        assert!(renderer.complete_decode(oldest, stale).is_none());
        assert!(renderer.complete_decode(newest, result).is_some());
    }

    #[test]
    fn test_npc_fallback_block_and_label() {
        let catalog = catalog();
        let mut scenes = SceneRegistry::new();
        scenes.register_scene(
            "room",
            SceneConfig { npcs: vec![Actor::new("stranger", 10.0, 30.0)], ..Default::default() },
        );
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 80, 80);
        let report = renderer.render_room("room").unwrap();
        assert_eq!(renderer.surface().pixel(15, 50), Some(RED));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_player_drawn_above_baseline() {
        let catalog = catalog();
        let mut scenes = SceneRegistry::new();
        scenes.register_scene("room", SceneConfig::default());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 200, 200);

        renderer.set_player(Some(PlayerState::at(50.0)));
        let report = renderer.render_room("room").unwrap();
        // No "player" sprite registered: red fallback block ending at the baseline row
        assert_eq!(renderer.surface().pixel(60, 90), Some(RED));
        assert_ne!(renderer.surface().pixel(60, 101), Some(RED));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_player_sprite_by_facing() {
        let mut catalog = catalog();
        catalog.register("player-back", Sprite::new(vec![vec![GREEN]]));
        let mut scenes = SceneRegistry::new();
        scenes.register_scene("room", SceneConfig::default());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 200, 200);

        renderer.set_player(Some(PlayerState { x: 20.0, facing: Facing::Back, ..Default::default() }));
        let report = renderer.render_room("room").unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(renderer.surface().pixel(21, 101), Some(GREEN));
    }

    #[test]
    fn test_walking_player_bobs_on_odd_frames() {
        let mut catalog = catalog();
        catalog.register("player", Sprite::new(vec![vec![GREEN]]));
        let mut scenes = SceneRegistry::new();
        scenes.register_scene("room", SceneConfig::default());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 200, 200);

        // Baseline row is y = 100; at scale 3.6 the 1x1 sprite spans 4 rows
        let rows_of = |renderer: &RoomRenderer<'_>| -> Vec<u32> {
            (90..110).filter(|&y| renderer.surface().pixel(21, y) == Some(GREEN)).collect()
        };

        renderer.set_player(Some(PlayerState { x: 20.0, walking: true, walk_frame: 0, ..Default::default() }));
        renderer.render_room("room").unwrap();
        assert_eq!(rows_of(&renderer), vec![100, 101, 102, 103]);

        renderer.set_player(Some(PlayerState { x: 20.0, walking: true, walk_frame: 1, ..Default::default() }));
        renderer.rerender().unwrap();
        assert_eq!(rows_of(&renderer), vec![98, 99, 100, 101]);

        renderer.set_player(Some(PlayerState { x: 20.0, walking: true, walk_frame: 2, ..Default::default() }));
        renderer.rerender().unwrap();
        assert_eq!(rows_of(&renderer), vec![100, 101, 102, 103]);

        // Standing still never bobs, whatever the frame
        renderer.set_player(Some(PlayerState { x: 20.0, walking: false, walk_frame: 1, ..Default::default() }));
        renderer.rerender().unwrap();
        assert_eq!(rows_of(&renderer), vec![100, 101, 102, 103]);
    }

    #[test]
    fn test_every_facing_uses_its_sprite() {
        let facings = [
            (Facing::Front, "player", Rgba([200, 0, 0, 255])),
            (Facing::Left, "player-left", Rgba([0, 200, 0, 255])),
            (Facing::Right, "player-right", Rgba([0, 0, 200, 255])),
            (Facing::Back, "player-back", Rgba([200, 200, 0, 255])),
        ];
        let mut catalog = catalog();
        for (facing, id, color) in facings {
            assert_eq!(facing.sprite_id(), id);
            catalog.register(id, Sprite::new(vec![vec![color]]));
        }
        let mut scenes = SceneRegistry::new();
        scenes.register_scene("room", SceneConfig::default());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 200, 200);

        for (facing, id, color) in facings {
            renderer.set_player(Some(PlayerState { x: 40.0, facing, ..Default::default() }));
            let report = renderer.render_room("room").unwrap();
            assert!(report.warnings.is_empty(), "{}: {:?}", id, report.warnings);
            assert_eq!(renderer.surface().pixel(41, 101), Some(color), "{}", id);
        }
    }

    #[test]
    fn test_missing_facing_sprite_falls_back_to_red_block() {
        let mut catalog = catalog();
        catalog.register("player", Sprite::new(vec![vec![GREEN]]));
        let mut scenes = SceneRegistry::new();
        scenes.register_scene("room", SceneConfig::default());
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 200, 200);

        renderer.set_player(Some(PlayerState { x: 40.0, facing: Facing::Left, ..Default::default() }));
        let report = renderer.render_room("room").unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("player-left"));
        assert_eq!(renderer.surface().pixel(41, 90), Some(RED));
    }

    #[test]
    fn test_debug_overlay_outlines_hotspots() {
        let catalog = catalog();
        let mut scenes = SceneRegistry::new();
        let hotspot = Hotspot::new("door", 10.0, 10.0, 30.0, 30.0);
        let config = SceneConfig {
            hotspots: vec![hotspot],
            exits: [("street".to_string(), Point::new(60.0, 20.0))].into_iter().collect(),
            ..Default::default()
        };
        scenes.register_scene("room", config);
        let provider = CatalogProvider::new(&catalog);

        let mut plain = RoomRenderer::new(&catalog, &scenes, &provider, 100, 100);
        plain.render_room("room").unwrap();
        let mut debug = RoomRenderer::new(&catalog, &scenes, &provider, 100, 100)
            .with_options(RenderOptions { debug: true, ..Default::default() });
        debug.render_room("room").unwrap();

        assert_ne!(plain.surface().pixel(25, 10), debug.surface().pixel(25, 10));
        assert_ne!(plain.surface().pixel(60, 20), debug.surface().pixel(60, 20));
        assert_eq!(plain.surface().pixel(25, 25), debug.surface().pixel(25, 25));
    }

    #[test]
    fn test_missing_element_sprite_still_paints() {
        let catalog = catalog();
        let mut scenes = SceneRegistry::new();
        scenes.register_scene(
            "room",
            SceneConfig { elements: vec![SceneElement::new("unknown", 5.0, 5.0)], ..Default::default() },
        );
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 60, 60);
        let report = renderer.render_room("room").unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_ne!(renderer.surface().pixel(0, 0), Some(TRANSPARENT));
    }
}
