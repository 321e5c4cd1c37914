//! Data model types for scenes, actors, hotspots and actions

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A non-fatal problem found while building or rendering something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A position in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A static prop placed in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub sprite: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Vertical extent above the floor; raises the sprite and stretches its shadow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
}

impl SceneElement {
    pub fn new(sprite: impl Into<String>, x: f64, y: f64) -> Self {
        Self { sprite: sprite.into(), x, y, scale: None, height: None, cast_shadow: None }
    }

    pub fn casts_shadow(&self) -> bool {
        self.cast_shadow != Some(false)
    }
}

/// An NPC standing in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub sprite: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
}

impl Actor {
    pub fn new(sprite: impl Into<String>, x: f64, y: f64) -> Self {
        Self { sprite: sprite.into(), x, y, scale: None, name: None, cast_shadow: None }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn casts_shadow(&self) -> bool {
        self.cast_shadow != Some(false)
    }
}

/// Interaction verbs offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    #[default]
    Walk,
    Look,
    Talk,
    Use,
    Take,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Walk, Verb::Look, Verb::Talk, Verb::Use, Verb::Take];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Walk => "walk",
            Verb::Look => "look",
            Verb::Talk => "talk",
            Verb::Use => "use",
            Verb::Take => "take",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown verb '{}' (expected walk, look, talk, use or take)", s))
    }
}

/// What a resolved interaction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Text for the message area.
    Narrate(String),
    /// Move to another scene.
    Transition(String),
}

/// Callable attached to a hotspot verb.
#[derive(Clone)]
pub struct Effect(Arc<dyn Fn() -> ActionResult + Send + Sync>);

impl Effect {
    pub fn new(f: impl Fn() -> ActionResult + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) -> ActionResult {
        (self.0)()
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}

/// Prefix of the shorthand that content files use for scene exits.
pub const EXIT_PREFIX: &str = "exit-to-";

/// The action bound to a verb on a hotspot.
#[derive(Debug, Clone)]
pub enum Action {
    Text(String),
    Transition(String),
    Effect(Effect),
}

impl Action {
    pub fn text(text: impl Into<String>) -> Self {
        Action::Text(text.into())
    }

    pub fn transition(scene: impl Into<String>) -> Self {
        Action::Transition(scene.into())
    }

    pub fn effect(f: impl Fn() -> ActionResult + Send + Sync + 'static) -> Self {
        Action::Effect(Effect::new(f))
    }
}

/// Effects compare by identity.
impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Text(a), Action::Text(b)) => a == b,
            (Action::Transition(a), Action::Transition(b)) => a == b,
            (Action::Effect(a), Action::Effect(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

/// On-disk form of an action: a string, or `{"goto": "<scene>"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ActionDef {
    Text(String),
    Goto { goto: String },
}

impl From<ActionDef> for Action {
    fn from(def: ActionDef) -> Self {
        match def {
            ActionDef::Goto { goto } => Action::Transition(goto),
            ActionDef::Text(s) => match s.strip_prefix(EXIT_PREFIX) {
                Some(dest) if !dest.is_empty() => Action::Transition(dest.to_string()),
                _ => Action::Text(s),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ActionDef::deserialize(deserializer).map(Action::from)
    }
}

/// A clickable rectangle with per-verb actions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "HotspotDef")]
pub struct Hotspot {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub description: String,
    pub actions: BTreeMap<Verb, Action>,
    /// Action keys from content that name no verb. They are dropped from
    /// `actions` and reported when the scene is built.
    pub unknown_verbs: Vec<String>,
}

/// Hotspot as written in content, with actions keyed by any string.
#[derive(Deserialize)]
struct HotspotDef {
    name: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    actions: BTreeMap<String, Action>,
}

impl From<HotspotDef> for Hotspot {
    fn from(def: HotspotDef) -> Self {
        let mut actions = BTreeMap::new();
        let mut unknown_verbs = Vec::new();
        for (key, action) in def.actions {
            match key.parse::<Verb>() {
                Ok(verb) => {
                    actions.insert(verb, action);
                }
                Err(_) => unknown_verbs.push(key),
            }
        }
        Self {
            name: def.name,
            x: def.x,
            y: def.y,
            width: def.width,
            height: def.height,
            description: def.description,
            actions,
            unknown_verbs,
        }
    }
}

impl Hotspot {
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            description: String::new(),
            actions: BTreeMap::new(),
            unknown_verbs: Vec::new(),
        }
    }

    pub fn with_action(mut self, verb: Verb, action: Action) -> Self {
        self.actions.insert(verb, action);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
