//! Pointer hit testing and verb resolution for hotspots

use crate::models::{Action, ActionResult, Hotspot, Verb};
use crate::scene::Scene;

/// Narration for a verb the hotspot does not handle.
pub const CANNOT_DO_THAT: &str = "You can't do that.";

impl Hotspot {
    /// Half-open containment: `x <= px < x + width`, same for y.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// The first hotspot, in declaration order, containing the point.
pub fn hit_test(scene: &Scene, px: f64, py: f64) -> Option<&Hotspot> {
    scene.hotspots.iter().find(|h| h.contains(px, py))
}

/// What happens when `verb` is applied to `hotspot`.
pub fn resolve_action(hotspot: &Hotspot, verb: Verb) -> ActionResult {
    match hotspot.actions.get(&verb) {
        Some(Action::Text(text)) => ActionResult::Narrate(text.clone()),
        Some(Action::Transition(scene)) => ActionResult::Transition(scene.clone()),
        Some(Action::Effect(effect)) => effect.invoke(),
        None => ActionResult::Narrate(CANNOT_DO_THAT.to_string()),
    }
}
