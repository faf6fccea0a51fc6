//! Loading font files through fontdue

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use duo_wire::FontDescriptor;
use fontdue::{Font, FontSettings};
use tracing::debug;

use crate::font::{resolve_font_path, FontFace, FontHandle, FontLoadError, RasterGlyph};

/// Produces a font handle for a descriptor. Called once per descriptor by
/// [`FontCache`](crate::font::FontCache).
pub trait FontLoader {
    fn load(&self, descriptor: &FontDescriptor) -> Result<FontHandle, FontLoadError>;
}

/// Loads TrueType/OpenType files with fontdue.
///
/// Without a root, a descriptor's family must be a readable file path (the
/// producer side, which records its own font path). With a root, families
/// are resolved against it as described in [`resolve_font_path`] (the
/// replaying side, which has its own font installation).
#[derive(Debug, Clone, Default)]
pub struct FontdueLoader {
    root: Option<PathBuf>,
}

impl FontdueLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl FontLoader for FontdueLoader {
    fn load(&self, descriptor: &FontDescriptor) -> Result<FontHandle, FontLoadError> {
        let path = resolve_font_path(&descriptor.family, self.root.as_deref())?;
        let data = std::fs::read(&path).map_err(|source| FontLoadError::Unreadable {
            path: path.clone(),
            source,
        })?;

        let face = FontdueFace::from_bytes(descriptor.clone(), data).map_err(|e| match e {
            FontLoadError::InvalidFontData { reason, .. } => FontLoadError::InvalidFontData {
                path: path.clone(),
                reason,
            },
            other => other,
        })?;

        debug!(
            "Loaded {} from {} (ascent {:.1}, descent {:.1})",
            descriptor,
            path.display(),
            face.ascent,
            face.descent
        );
        Ok(Arc::new(face))
    }
}

/// A fontdue font bound to one pixel size
pub struct FontdueFace {
    descriptor: FontDescriptor,
    font: Font,
    ascent: f32,
    descent: f32,
}

impl FontdueFace {
    /// Parse raw font bytes for `descriptor`'s pixel size
    pub fn from_bytes(descriptor: FontDescriptor, data: Vec<u8>) -> Result<Self, FontLoadError> {
        if !descriptor.has_valid_size() {
            return Err(FontLoadError::invalid_size(&descriptor));
        }

        let settings = FontSettings {
            scale: descriptor.size,
            ..Default::default()
        };

        let font = Font::from_bytes(data, settings).map_err(|reason| {
            FontLoadError::InvalidFontData {
                path: PathBuf::from(&descriptor.family),
                reason: reason.to_string(),
            }
        })?;

        let line = font
            .horizontal_line_metrics(descriptor.size)
            .ok_or_else(|| FontLoadError::MissingLineMetrics {
                family: descriptor.family.clone(),
            })?;

        Ok(Self {
            // fontdue reports descent as a negative offset from the baseline
            ascent: line.ascent,
            descent: -line.descent,
            descriptor,
            font,
        })
    }
}

impl FontFace for FontdueFace {
    fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }

    fn advance(&self, ch: char) -> f32 {
        self.font.metrics(ch, self.descriptor.size).advance_width
    }

    fn rasterize(&self, ch: char) -> RasterGlyph {
        let (metrics, coverage) = self.font.rasterize(ch, self.descriptor.size);
        RasterGlyph {
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            advance: metrics.advance_width,
            coverage,
        }
    }
}

impl fmt::Debug for FontdueFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontdueFace")
            .field("descriptor", &self.descriptor)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish()
    }
}
