//! Sprite catalog: id → sprite, with a procedural built-in library
//!
//! The built-in library (characters, furniture, terrain and scene
//! backgrounds) is generated on [`SpriteCatalog::warm_up`]. Generators are
//! looked up from a static table and only run for ids not yet registered, so
//! sprites registered by content files are never overwritten.

mod backgrounds;
mod characters;
mod furniture;
pub mod noise;
pub mod palette;
mod terrain;

use std::collections::HashMap;

use crate::color::Color;
use crate::registry::Registry;
use crate::sprite::Sprite;

pub use noise::{Noise, DEFAULT_NOISE_PERCENT};

/// A built-in sprite generator.
pub type Generator = fn(&mut Noise) -> Sprite;

static TABLES: [&[(&str, Generator)]; 4] =
    [characters::BUILTINS, furniture::BUILTINS, terrain::BUILTINS, backgrounds::BUILTINS];

/// All built-in generators in registration order.
fn builtins() -> impl Iterator<Item = &'static (&'static str, Generator)> {
    TABLES.iter().flat_map(|table| table.iter())
}

/// Build a sprite from one-character rows and a color legend.
fn pixels(legend: &[(char, Color)], rows: &[&str]) -> Sprite {
    let palette: HashMap<char, Color> = legend.iter().copied().collect();
    let (sprite, warnings) = Sprite::from_tokens(&palette, rows);
    debug_assert!(warnings.is_empty(), "built-in sprite has unknown tokens: {:?}", warnings);
    sprite
}

/// Options for building a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOptions {
    /// Noise seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Share of background cells that get brightness jitter, in percent.
    pub noise_percent: f64,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self { seed: None, noise_percent: DEFAULT_NOISE_PERCENT }
    }
}

/// Registry of sprites by id.
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    sprites: HashMap<String, Sprite>,
    noise: Noise,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteCatalog {
    /// Create an empty catalog with an entropy-seeded noise source.
    pub fn new() -> Self {
        Self::with_options(CatalogOptions::default())
    }

    pub fn with_options(options: CatalogOptions) -> Self {
        let noise = match options.seed {
            Some(seed) => Noise::new(seed, options.noise_percent),
            None => Noise::from_entropy(options.noise_percent),
        };
        Self { sprites: HashMap::new(), noise }
    }

    /// Create a catalog with a fixed seed and the built-in library loaded.
    pub fn seeded(seed: u64) -> Self {
        let mut catalog = Self::with_options(CatalogOptions { seed: Some(seed), ..Default::default() });
        catalog.warm_up();
        catalog
    }

    /// Seed of the noise source used by generators.
    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    /// Register a sprite, replacing any existing entry. Returns the sprite.
    pub fn register(&mut self, id: impl Into<String>, sprite: Sprite) -> Sprite {
        self.sprites.insert(id.into(), sprite.clone());
        sprite
    }

    pub fn get(&self, id: &str) -> Option<&Sprite> {
        self.sprites.get(id)
    }

    /// Generate every built-in sprite that is not registered yet.
    ///
    /// Returns how many sprites were added.
    pub fn warm_up(&mut self) -> usize {
        let mut added = 0;
        for (id, generate) in builtins() {
            if self.sprites.contains_key(*id) {
                continue;
            }
            let sprite = generate(&mut self.noise);
            self.sprites.insert((*id).to_string(), sprite);
            added += 1;
        }
        log::debug!("catalog warm-up added {} sprites (seed {})", added, self.seed());
        added
    }

    /// Ids of the built-in library.
    pub fn builtin_ids() -> impl Iterator<Item = &'static str> {
        builtins().map(|(id, _)| *id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sprites.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Sprite)> {
        self.sprites.iter()
    }
}

impl Registry<Sprite> for SpriteCatalog {
    fn contains(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    fn len(&self) -> usize {
        self.sprites.len()
    }

    fn clear(&mut self) {
        self.sprites.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.sprites.keys())
    }
}
