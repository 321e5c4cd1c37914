//! Image providers for scene backgrounds
//!
//! The room renderer never loads images itself; it asks an [`ImageProvider`]
//! for a reference and gets back one of:
//! - [`ImageHandle::Ready`] with the decoded image
//! - [`ImageHandle::Pending`] with a ticket to be completed later
//! - [`ImageHandle::Missing`] when nothing is known under that reference

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

use crate::catalog::SpriteCatalog;
use crate::sprite::SpriteError;

/// Identifies one deferred decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeTicket(pub u64);

/// Result of asking a provider for an image.
#[derive(Debug, Clone)]
pub enum ImageHandle {
    Ready(Arc<RgbaImage>),
    Pending(DecodeTicket),
    Missing,
}

/// Error type for image loading failures
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode '{reference}': {source}")]
    Decode {
        reference: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to rasterize '{reference}': {source}")]
    Rasterize {
        reference: String,
        #[source]
        source: SpriteError,
    },
    #[error("image '{0}' not found")]
    NotFound(String),
    #[error("image '{0}' is still pending")]
    StillPending(String),
}

/// Source of background images.
pub trait ImageProvider {
    /// Look up `reference`. I/O and decode failures are errors; an unknown
    /// reference is [`ImageHandle::Missing`].
    fn request(&self, reference: &str) -> Result<ImageHandle, ProviderError>;
}

/// Rasterizes catalog sprites, so procedural backgrounds can be used as images.
#[derive(Debug, Clone, Copy)]
pub struct CatalogProvider<'a> {
    catalog: &'a SpriteCatalog,
    scale: u32,
}

impl<'a> CatalogProvider<'a> {
    pub fn new(catalog: &'a SpriteCatalog) -> Self {
        Self { catalog, scale: 1 }
    }

    /// Rasterize at this integer scale. The renderer stretches backgrounds to
    /// the surface anyway, so this only matters to callers that keep the image.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }
}

impl ImageProvider for CatalogProvider<'_> {
    fn request(&self, reference: &str) -> Result<ImageHandle, ProviderError> {
        let id = reference.strip_suffix(".png").unwrap_or(reference);
        let Some(sprite) = self.catalog.get(id) else {
            return Ok(ImageHandle::Missing);
        };
        let image = sprite
            .to_image(self.scale)
            .map_err(|source| ProviderError::Rasterize { reference: reference.to_string(), source })?;
        Ok(ImageHandle::Ready(Arc::new(image)))
    }
}

/// Loads PNG files from a directory. `bar-background` maps to `bar-background.png`.
#[derive(Debug, Default)]
pub struct DirectoryProvider {
    root: PathBuf,
    cache: RefCell<HashMap<String, Arc<RgbaImage>>>,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), cache: RefCell::new(HashMap::new()) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &str) -> PathBuf {
        if Path::new(reference).extension().is_some() {
            self.root.join(reference)
        } else {
            self.root.join(format!("{}.png", reference))
        }
    }
}

impl ImageProvider for DirectoryProvider {
    fn request(&self, reference: &str) -> Result<ImageHandle, ProviderError> {
        if let Some(image) = self.cache.borrow().get(reference) {
            return Ok(ImageHandle::Ready(Arc::clone(image)));
        }

        let path = self.path_for(reference);
        if !path.is_file() {
            return Ok(ImageHandle::Missing);
        }
        let bytes = std::fs::read(&path).map_err(|source| ProviderError::Io { path: path.clone(), source })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| ProviderError::Decode { reference: reference.to_string(), source })?
            .to_rgba8();

        let image = Arc::new(image);
        self.cache.borrow_mut().insert(reference.to_string(), Arc::clone(&image));
        Ok(ImageHandle::Ready(image))
    }
}

/// Wraps another provider and hands out tickets instead of images.
///
/// Decodes happen on [`DeferredProvider::poll_ready`]; completed images are
/// cached so a later request for the same reference is `Ready` at once.
pub struct DeferredProvider<P> {
    inner: P,
    next_ticket: Cell<u64>,
    queue: RefCell<Vec<(DecodeTicket, String)>>,
    done: RefCell<HashMap<String, Arc<RgbaImage>>>,
}

impl<P: ImageProvider> DeferredProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            next_ticket: Cell::new(1),
            queue: RefCell::new(Vec::new()),
            done: RefCell::new(HashMap::new()),
        }
    }

    /// Number of requests waiting to be decoded.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Decode everything queued so far, in request order.
    pub fn poll_ready(&self) -> Vec<(DecodeTicket, Result<Arc<RgbaImage>, ProviderError>)> {
        let queued = std::mem::take(&mut *self.queue.borrow_mut());
        queued
            .into_iter()
            .map(|(ticket, reference)| {
                let result = match self.inner.request(&reference) {
                    Ok(ImageHandle::Ready(image)) => {
                        self.done.borrow_mut().insert(reference, Arc::clone(&image));
                        Ok(image)
                    }
                    Ok(ImageHandle::Pending(_)) => Err(ProviderError::StillPending(reference)),
                    Ok(ImageHandle::Missing) => Err(ProviderError::NotFound(reference)),
                    Err(e) => Err(e),
                };
                (ticket, result)
            })
            .collect()
    }
}

impl<P: ImageProvider> ImageProvider for DeferredProvider<P> {
    fn request(&self, reference: &str) -> Result<ImageHandle, ProviderError> {
        if let Some(image) = self.done.borrow().get(reference) {
            return Ok(ImageHandle::Ready(Arc::clone(image)));
        }
        let ticket = DecodeTicket(self.next_ticket.get());
        self.next_ticket.set(ticket.0 + 1);
        self.queue.borrow_mut().push((ticket, reference.to_string()));
        log::debug!("deferred decode of '{}' as ticket {}", reference, ticket.0);
        Ok(ImageHandle::Pending(ticket))
    }
}

impl<T: ImageProvider + ?Sized> ImageProvider for &T {
    fn request(&self, reference: &str) -> Result<ImageHandle, ProviderError> {
        (**self).request(reference)
    }
}
