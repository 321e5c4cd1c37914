//! Common trait for registries that store named items.

/// Common trait for registries that map string ids to values.
///
/// Implemented by the sprite catalog and the scene registry so callers can
/// check, count and enumerate either one the same way.
///
/// # Example
///
/// ```
/// use pixelroom::registry::Registry;
/// use pixelroom::scene::{SceneConfig, SceneRegistry};
///
/// let mut scenes = SceneRegistry::new();
/// scenes.register_scene("bar", SceneConfig::default());
///
/// assert!(scenes.contains("bar"));
/// assert_eq!(Registry::len(&scenes), 1);
/// ```
pub trait Registry<V> {
    /// Check if an item with the given id exists in the registry.
    fn contains(&self, name: &str) -> bool;

    /// Get an item by id.
    ///
    /// Returns `None` if no item with the given id exists.
    fn get(&self, name: &str) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the registry.
    fn clear(&mut self);

    /// Get an iterator over all ids in the registry.
    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_>;
}
