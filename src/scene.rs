//! Scene records and the scene registry
//!
//! A [`Scene`] is pure data: what to draw and where the hotspots are. Scenes
//! are built from a [`SceneConfig`] (the serde form used by content files)
//! and stored in a [`SceneRegistry`]. The registry has no notion of a current
//! scene; that belongs to the session driving it.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::color::{parse_color, Color, DEFAULT_FLOOR, DEFAULT_WALL};
use crate::models::{Actor, Hotspot, Point, SceneElement, Warning};
use crate::registry::Registry;

/// Background as written in content: a sprite/image reference or a color string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundDef {
    Image(String),
    Color(String),
}

/// Resolved background of a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// Image reference resolved through an `ImageProvider`.
    Image(String),
    /// Flat base color.
    Color(Color),
}

/// Declarative scene description. Every field is optional in content files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub description: String,
    pub background: Option<BackgroundDef>,
    pub elements: Vec<SceneElement>,
    pub npcs: Vec<Actor>,
    pub hotspots: Vec<Hotspot>,
    /// Destination scene id → where the player appears when arriving from there.
    pub exits: BTreeMap<String, Point>,
    pub wall_color: Option<String>,
    pub floor_color: Option<String>,
}

/// A fully-formed scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: String,
    pub description: String,
    pub background: Option<Background>,
    pub elements: Vec<SceneElement>,
    pub npcs: Vec<Actor>,
    pub hotspots: Vec<Hotspot>,
    pub exits: BTreeMap<String, Point>,
    pub wall_color: Color,
    pub floor_color: Color,
}

impl Scene {
    /// An empty scene with neutral colors.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            background: None,
            elements: Vec::new(),
            npcs: Vec::new(),
            hotspots: Vec::new(),
            exits: BTreeMap::new(),
            wall_color: DEFAULT_WALL,
            floor_color: DEFAULT_FLOOR,
        }
    }

    /// Build a scene from its config, filling defaults.
    ///
    /// Unparseable colors fall back to the defaults with a warning.
    pub fn from_config(id: impl Into<String>, config: SceneConfig) -> (Scene, Vec<Warning>) {
        let id = id.into();
        let mut warnings = Vec::new();
        let mut color = |field: &str, value: Option<String>, default: Color| match value {
            None => default,
            Some(s) => parse_color(&s).unwrap_or_else(|e| {
                warnings.push(Warning::new(format!("Scene '{}': invalid {} '{}': {}", id, field, s, e)));
                default
            }),
        };

        let wall_color = color("wall_color", config.wall_color, DEFAULT_WALL);
        let floor_color = color("floor_color", config.floor_color, DEFAULT_FLOOR);
        let background = match config.background {
            None => None,
            Some(BackgroundDef::Image(reference)) => Some(Background::Image(reference)),
            Some(BackgroundDef::Color(s)) => Some(Background::Color(color("background color", Some(s), wall_color))),
        };

        for hotspot in &config.hotspots {
            for verb in &hotspot.unknown_verbs {
                warnings.push(Warning::new(format!(
                    "Scene '{}': hotspot '{}' has unknown verb '{}', action ignored",
                    id, hotspot.name, verb
                )));
            }
        }

        let scene = Scene {
            id: id.clone(),
            description: config.description,
            background,
            elements: config.elements,
            npcs: config.npcs,
            hotspots: config.hotspots,
            exits: config.exits,
            wall_color,
            floor_color,
        };
        (scene, warnings)
    }

    /// The declared background image reference, if any.
    pub fn background_image(&self) -> Option<&str> {
        match &self.background {
            Some(Background::Image(reference)) => Some(reference),
            _ => None,
        }
    }
}

/// Registry of scenes by id.
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    scenes: HashMap<String, Scene>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and store a scene from a config, replacing any scene with the same id.
    ///
    /// Color problems are logged and replaced by defaults.
    pub fn register_scene(&mut self, id: impl Into<String>, config: SceneConfig) -> &Scene {
        let (scene, warnings) = Scene::from_config(id, config);
        for w in &warnings {
            log::warn!("{}", w);
        }
        self.insert(scene)
    }

    /// Store a prebuilt scene, replacing any scene with the same id.
    pub fn insert(&mut self, scene: Scene) -> &Scene {
        let id = scene.id.clone();
        log::debug!("registered scene '{}'", id);
        self.scenes.insert(id.clone(), scene);
        &self.scenes[&id]
    }

    pub fn get_scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Scene ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Scene)> {
        self.scenes.iter()
    }
}

impl Registry<Scene> for SceneRegistry {
    fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    fn len(&self) -> usize {
        self.scenes.len()
    }

    fn clear(&mut self) {
        self.scenes.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.scenes.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Verb};
    use image::Rgba;

    #[test]
    fn test_register_scene_defaults() {
        let mut registry = SceneRegistry::new();
        let scene = registry.register_scene("empty", SceneConfig::default());
        assert_eq!(scene.id, "empty");
        assert_eq!(scene.description, "");
        assert!(scene.background.is_none());
        assert!(scene.elements.is_empty() && scene.npcs.is_empty() && scene.hotspots.is_empty());
        assert!(scene.exits.is_empty());
        assert_eq!(scene.wall_color, DEFAULT_WALL);
        assert_eq!(scene.floor_color, DEFAULT_FLOOR);
    }

    #[test]
    fn test_get_scene() {
        let mut registry = SceneRegistry::new();
        registry.register_scene("bar", SceneConfig::default());
        assert!(registry.get_scene("bar").is_some());
        assert!(registry.get_scene("street").is_none());
        assert!(registry.contains("bar"));
    }

    #[test]
    fn test_replacing_scene() {
        let mut registry = SceneRegistry::new();
        registry.register_scene("bar", SceneConfig::default());
        let config = SceneConfig { description: "Smoky.".into(), ..Default::default() };
        registry.register_scene("bar", config);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_scene("bar").map(|s| s.description.as_str()), Some("Smoky."));
    }

    #[test]
    fn test_invalid_color_warns_and_defaults() {
        let config = SceneConfig { wall_color: Some("#XYZ".into()), ..Default::default() };
        let (scene, warnings) = Scene::from_config("bad", config);
        assert_eq!(scene.wall_color, DEFAULT_WALL);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("wall_color"));
    }

    #[test]
    fn test_config_from_json() {
        let config: SceneConfig = serde_json::from_str(
            r##"{
                "description": "A dimly lit bar.",
                "background": {"color": "#331100"},
                "elements": [{"sprite": "table", "x": 200, "y": 300, "height": 10}],
                "npcs": [{"sprite": "bartender", "x": 400, "y": 250, "name": "Sam"}],
                "hotspots": [{"name": "door", "x": 50, "y": 150, "width": 80, "height": 150,
                              "actions": {"use": "exit-to-street"}}],
                "exits": {"street": {"x": 50, "y": 200}}
            }"##,
        )
        .unwrap();
        let (scene, warnings) = Scene::from_config("bar", config);
        assert!(warnings.is_empty());
        assert_eq!(scene.background, Some(Background::Color(Rgba([0x33, 0x11, 0x00, 255]))));
        assert_eq!(scene.elements[0].height, Some(10.0));
        assert_eq!(scene.npcs[0].name.as_deref(), Some("Sam"));
        assert_eq!(scene.hotspots[0].actions.get(&Verb::Use), Some(&Action::transition("street")));
        assert_eq!(scene.exits.get("street"), Some(&Point::new(50.0, 200.0)));
    }

    #[test]
    fn test_background_image_reference() {
        let config = SceneConfig { background: Some(BackgroundDef::Image("bar-background".into())), ..Default::default() };
        let (scene, _) = Scene::from_config("bar", config);
        assert_eq!(scene.background_image(), Some("bar-background"));
    }

    #[test]
    fn test_ids_sorted() {
        let mut registry = SceneRegistry::new();
        for id in ["street", "bar", "hotel-lobby"] {
            registry.register_scene(id, SceneConfig::default());
        }
        assert_eq!(registry.ids(), vec!["bar", "hotel-lobby", "street"]);
    }
}
