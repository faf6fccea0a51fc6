//! Descriptor-keyed font cache

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use duo_wire::FontDescriptor;
use tracing::debug;

use crate::font::{FontHandle, FontLoader};

/// Font loading error types
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("Font not found: {family}")]
    NotFound { family: String },

    #[error("Failed to read font file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font data in {}: {reason}", path.display())]
    InvalidFontData { path: PathBuf, reason: String },

    #[error("Font {family} has no horizontal line metrics")]
    MissingLineMetrics { family: String },

    #[error("Invalid size {size} for font {family}")]
    InvalidSize { family: String, size: f32 },
}

impl FontLoadError {
    pub(crate) fn invalid_size(descriptor: &FontDescriptor) -> Self {
        FontLoadError::InvalidSize {
            family: descriptor.family.clone(),
            size: descriptor.size,
        }
    }
}

/// Resolves descriptors to loaded fonts, loading each descriptor at most once.
///
/// Entries are never evicted: a dashboard only ever uses a handful of sizes.
pub struct FontCache {
    loader: Box<dyn FontLoader>,
    fonts: HashMap<FontDescriptor, FontHandle>,
}

impl FontCache {
    pub fn new(loader: impl FontLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            fonts: HashMap::new(),
        }
    }

    /// Get the font for `descriptor`, loading it on first use.
    ///
    /// A failed load is not cached, and no fallback font is substituted.
    /// Sizes that are not finite and positive never reach the loader.
    pub fn get(&mut self, descriptor: &FontDescriptor) -> Result<FontHandle, FontLoadError> {
        if let Some(handle) = self.fonts.get(descriptor) {
            return Ok(Arc::clone(handle));
        }

        if !descriptor.has_valid_size() {
            return Err(FontLoadError::invalid_size(descriptor));
        }

        debug!("Loading font {}", descriptor);
        let handle = self.loader.load(descriptor)?;
        self.fonts.insert(descriptor.clone(), Arc::clone(&handle));
        Ok(handle)
    }

    pub fn contains(&self, descriptor: &FontDescriptor) -> bool {
        self.fonts.contains_key(descriptor)
    }

    /// Number of loaded descriptors
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCache")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}
