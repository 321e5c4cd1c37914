//! Game session: current scene, player, selected verb and overlay flags
//!
//! The session is the only place that knows which scene is current. Clicks go
//! through the hotspot resolver; transitions switch scenes here.

use crate::hotspot::{hit_test, resolve_action};
use crate::models::{ActionResult, Verb};
use crate::room::{Facing, FrameReport, PlayerState, RenderError, RoomRenderer};
use crate::scene::{Scene, SceneRegistry};

/// Where the player starts in a scene entered without a matching exit.
pub const DEFAULT_PLAYER_X: f64 = 100.0;

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Nothing there for this verb.
    Nothing,
    /// The player walked to `x`.
    Walked { x: f64 },
    /// A hotspot answered with text.
    Narration { hotspot: String, text: String },
    /// The current scene changed.
    Entered { from: String, to: String },
}

#[derive(Debug, Clone)]
pub struct Session<'a> {
    scenes: &'a SceneRegistry,
    current: String,
    player: PlayerState,
    verb: Verb,
    debug: bool,
    show_names: bool,
}

impl<'a> Session<'a> {
    /// Start in `start`, which must be registered.
    pub fn new(scenes: &'a SceneRegistry, start: &str) -> Result<Self, RenderError> {
        if scenes.get_scene(start).is_none() {
            return Err(RenderError::SceneNotFound(start.to_string()));
        }
        Ok(Self {
            scenes,
            current: start.to_string(),
            player: PlayerState::at(DEFAULT_PLAYER_X),
            verb: Verb::default(),
            debug: false,
            show_names: false,
        })
    }

    pub fn current_scene_id(&self) -> &str {
        &self.current
    }

    pub fn current_scene(&self) -> Option<&'a Scene> {
        self.scenes.get_scene(&self.current)
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn select_verb(&mut self, verb: Verb) {
        self.verb = verb;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn show_names(&self) -> bool {
        self.show_names
    }

    pub fn set_show_names(&mut self, show_names: bool) {
        self.show_names = show_names;
    }

    /// Move the player to `x`, facing the direction of travel.
    ///
    /// The player stays in the walking pose, advancing one animation frame
    /// per step, until [`Session::arrive`] or another action stops them.
    pub fn walk_to(&mut self, x: f64) {
        if x < self.player.x {
            self.player.facing = Facing::Left;
        } else if x > self.player.x {
            self.player.facing = Facing::Right;
        }
        self.player.x = x;
        self.player.walking = true;
        self.player.walk_frame = self.player.walk_frame.wrapping_add(1);
    }

    /// The player has reached their destination and stands still.
    pub fn arrive(&mut self) {
        self.player.walking = false;
    }

    /// Apply the selected verb at a surface position.
    ///
    /// With `walk` selected, a click on empty floor (or on a hotspot with no
    /// walk action) moves the player. A transition to an unknown scene is an
    /// error and leaves the session where it was.
    pub fn click(&mut self, x: f64, y: f64) -> Result<ClickOutcome, RenderError> {
        let scene = self.current_scene().ok_or_else(|| RenderError::SceneNotFound(self.current.clone()))?;
        let target = hit_test(scene, x, y).filter(|h| self.verb != Verb::Walk || h.actions.contains_key(&Verb::Walk));

        let Some(hotspot) = target else {
            if self.verb == Verb::Walk {
                self.walk_to(x);
                return Ok(ClickOutcome::Walked { x });
            }
            return Ok(ClickOutcome::Nothing);
        };

        log::debug!("{} {} in '{}'", self.verb, hotspot.name, self.current);
        match resolve_action(hotspot, self.verb) {
            ActionResult::Narrate(text) => {
                self.arrive();
                Ok(ClickOutcome::Narration { hotspot: hotspot.name.clone(), text })
            }
            ActionResult::Transition(to) => self.enter(&to),
        }
    }

    /// Switch to `to`. The player appears at the destination's exit back to
    /// the scene being left, when it declares one.
    pub fn enter(&mut self, to: &str) -> Result<ClickOutcome, RenderError> {
        let Some(destination) = self.scenes.get_scene(to) else {
            log::error!("transition from '{}' to unknown scene '{}'", self.current, to);
            return Err(RenderError::SceneNotFound(to.to_string()));
        };
        let from = std::mem::replace(&mut self.current, to.to_string());
        if let Some(entry) = destination.exits.get(&from) {
            self.player.x = entry.x;
        }
        self.arrive();
        log::debug!("entered '{}' from '{}'", to, from);
        Ok(ClickOutcome::Entered { from, to: to.to_string() })
    }

    /// Push player and overlay flags into a renderer and draw the current scene.
    pub fn apply_to(&self, renderer: &mut RoomRenderer<'_>) -> Result<FrameReport, RenderError> {
        renderer.set_player(Some(self.player));
        let options = renderer.options_mut();
        options.debug = self.debug;
        options.show_names = self.show_names;
        renderer.render_room(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpriteCatalog;
    use crate::models::{Action, Hotspot, Point};
    use crate::provider::CatalogProvider;
    use crate::room::RoomState;

    fn registry() -> SceneRegistry {
        let mut bar = Scene::new("bar");
        bar.hotspots.push(
            Hotspot::new("door", 50.0, 150.0, 80.0, 150.0)
                .with_action(Verb::Use, Action::transition("street"))
                .with_action(Verb::Look, Action::text("The way out.")),
        );
        bar.hotspots.push(Hotspot::new("trapdoor", 300.0, 300.0, 20.0, 20.0).with_action(Verb::Use, Action::transition("cellar")));
        bar.exits.insert("street".into(), Point::new(60.0, 200.0));

        let mut street = Scene::new("street");
        street.exits.insert("bar".into(), Point::new(420.0, 250.0));

        let mut scenes = SceneRegistry::new();
        scenes.insert(bar);
        scenes.insert(street);
        scenes
    }

    #[test]
    fn test_new_requires_known_scene() {
        let scenes = registry();
        assert!(Session::new(&scenes, "bar").is_ok());
        assert_eq!(Session::new(&scenes, "moon").unwrap_err(), RenderError::SceneNotFound("moon".into()));
    }

    #[test]
    fn test_walk_click_on_floor() {
        let scenes = registry();
        let mut session = Session::new(&scenes, "bar").unwrap();
        assert_eq!(session.click(20.0, 20.0).unwrap(), ClickOutcome::Walked { x: 20.0 });
        assert_eq!(session.player().x, 20.0);
        assert_eq!(session.player().facing, Facing::Left);
        // Walking through a hotspot without a walk action
        assert_eq!(session.click(90.0, 200.0).unwrap(), ClickOutcome::Walked { x: 90.0 });
        assert_eq!(session.player().facing, Facing::Right);
    }

    #[test]
    fn test_walking_pose_until_arrival() {
        let scenes = registry();
        let mut session = Session::new(&scenes, "bar").unwrap();
        assert!(!session.player().walking);

        session.click(20.0, 20.0).unwrap();
        session.click(40.0, 20.0).unwrap();
        assert!(session.player().walking);
        assert_eq!(session.player().walk_frame, 2);

        session.arrive();
        assert!(!session.player().walking);
        assert_eq!(session.player().x, 40.0);
    }

    #[test]
    fn test_narration_and_transition_stop_walking() {
        let scenes = registry();
        let mut session = Session::new(&scenes, "bar").unwrap();
        session.walk_to(80.0);
        session.select_verb(Verb::Look);
        session.click(90.0, 200.0).unwrap();
        assert!(!session.player().walking);

        session.walk_to(70.0);
        session.select_verb(Verb::Use);
        session.click(90.0, 200.0).unwrap();
        assert!(!session.player().walking);
        assert_eq!(session.current_scene_id(), "street");
    }

    #[test]
    fn test_walking_player_bobs_in_rendered_frame() {
        let scenes = registry();
        let mut catalog = SpriteCatalog::new();
        let green = image::Rgba([0, 200, 0, 255]);
        catalog.register("player-right", crate::sprite::Sprite::new(vec![vec![green]]));
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 200, 200);

        // One step: frame 1 lifts the sprite by 2px above the baseline row (y = 100)
        let mut session = Session::new(&scenes, "bar").unwrap();
        session.walk_to(120.0);
        session.apply_to(&mut renderer).unwrap();
        assert_eq!(renderer.surface().pixel(121, 99), Some(green));
        assert_ne!(renderer.surface().pixel(121, 103), Some(green));

        session.arrive();
        session.apply_to(&mut renderer).unwrap();
        assert_ne!(renderer.surface().pixel(121, 99), Some(green));
        assert_eq!(renderer.surface().pixel(121, 103), Some(green));
    }

    #[test]
    fn test_look_and_missing_verb() {
        let scenes = registry();
        let mut session = Session::new(&scenes, "bar").unwrap();
        session.select_verb(Verb::Look);
        assert_eq!(
            session.click(90.0, 200.0).unwrap(),
            ClickOutcome::Narration { hotspot: "door".into(), text: "The way out.".into() }
        );
        assert_eq!(session.click(5.0, 5.0).unwrap(), ClickOutcome::Nothing);

        session.select_verb(Verb::Take);
        assert_eq!(
            session.click(90.0, 200.0).unwrap(),
            ClickOutcome::Narration { hotspot: "door".into(), text: "You can't do that.".into() }
        );
    }

    #[test]
    fn test_use_door_enters_street() {
        let scenes = registry();
        let mut session = Session::new(&scenes, "bar").unwrap();
        session.select_verb(Verb::Use);
        assert_eq!(
            session.click(90.0, 200.0).unwrap(),
            ClickOutcome::Entered { from: "bar".into(), to: "street".into() }
        );
        assert_eq!(session.current_scene_id(), "street");
        assert_eq!(session.player().x, 420.0);
    }

    #[test]
    fn test_transition_to_unknown_scene_keeps_current() {
        let scenes = registry();
        let mut session = Session::new(&scenes, "bar").unwrap();
        session.select_verb(Verb::Use);
        let err = session.click(305.0, 305.0).unwrap_err();
        assert_eq!(err, RenderError::SceneNotFound("cellar".into()));
        assert_eq!(session.current_scene_id(), "bar");
    }

    #[test]
    fn test_apply_to_renderer() {
        let scenes = registry();
        let catalog = SpriteCatalog::new();
        let provider = CatalogProvider::new(&catalog);
        let mut renderer = RoomRenderer::new(&catalog, &scenes, &provider, 160, 120);

        let mut session = Session::new(&scenes, "street").unwrap();
        session.set_debug(true);
        session.set_show_names(true);
        let report = session.apply_to(&mut renderer).unwrap();

        assert_eq!(report.scene_id, "street");
        assert_eq!(renderer.state(), &RoomState::Bound("street".into()));
        assert!(renderer.options().debug && renderer.options().show_names);
        assert_eq!(renderer.player().map(|p| p.x), Some(DEFAULT_PLAYER_X));
    }
}
