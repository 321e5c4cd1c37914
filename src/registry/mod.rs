//! Shared interface for the id-keyed stores.
//!
//! The concrete registries live with their domains:
//! - [`crate::catalog::SpriteCatalog`] maps sprite ids to sprites
//! - [`crate::scene::SceneRegistry`] maps scene ids to scenes

mod traits;

pub use traits::Registry;
