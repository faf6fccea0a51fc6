//! Dummy backend for testing layout and replay without real font files

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use duo_wire::{CanvasSize, FontDescriptor, RectangleCommand, TextCommand};

use crate::font::{FontFace, FontHandle, FontLoadError, FontLoader, RasterGlyph};
use crate::traits::Surface;

/// Loader producing [`MonospaceFace`]s for any family, or only for a fixed set
#[derive(Debug, Clone, Default)]
pub struct MonospaceLoader {
    families: Option<HashSet<String>>,
}

impl MonospaceLoader {
    /// Loader that knows every family
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that only knows `families`, matched by name or by file stem,
    /// ignoring case
    pub fn with_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            families: Some(
                families
                    .into_iter()
                    .map(|family| family.as_ref().to_lowercase())
                    .collect(),
            ),
        }
    }

    fn knows(&self, family: &str) -> bool {
        let Some(known) = &self.families else {
            return true;
        };
        let stem = Path::new(family)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase());
        known.contains(&family.to_lowercase())
            || stem.map(|stem| known.contains(&stem)).unwrap_or(false)
    }
}

impl FontLoader for MonospaceLoader {
    fn load(&self, descriptor: &FontDescriptor) -> Result<FontHandle, FontLoadError> {
        if !self.knows(&descriptor.family) {
            return Err(FontLoadError::NotFound {
                family: descriptor.family.clone(),
            });
        }
        Ok(Arc::new(MonospaceFace::new(descriptor.clone())))
    }
}

/// Synthetic fixed-pitch font with round-number metrics.
///
/// Every character advances `3/5` of the size; ascent is `4/5` of the size
/// and descent `1/5`. Glyphs rasterize to a solid block covering the line, except
/// whitespace which has no ink.
#[derive(Debug, Clone)]
pub struct MonospaceFace {
    descriptor: FontDescriptor,
}

impl MonospaceFace {
    pub fn new(descriptor: FontDescriptor) -> Self {
        Self { descriptor }
    }
}

impl FontFace for MonospaceFace {
    fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    fn ascent(&self) -> f32 {
        self.descriptor.size * 4.0 / 5.0
    }

    fn descent(&self) -> f32 {
        self.descriptor.size / 5.0
    }

    fn advance(&self, _ch: char) -> f32 {
        self.descriptor.size * 3.0 / 5.0
    }

    fn rasterize(&self, ch: char) -> RasterGlyph {
        let advance = self.advance(ch);
        if ch.is_whitespace() {
            return RasterGlyph {
                advance,
                ..Default::default()
            };
        }

        let width = advance.round() as usize;
        let height = self.line_height().round() as usize;
        RasterGlyph {
            xmin: 0,
            ymin: -(self.descent().round() as i32),
            width,
            height,
            advance,
            coverage: vec![255; width * height],
        }
    }
}

/// One call received by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Rectangle(RectangleCommand),
    Text {
        command: TextCommand,
        /// Descriptor of the font the surface was handed
        font: FontDescriptor,
    },
}

/// Surface that records every call for later inspection
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    canvas: CanvasSize,
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            calls: Vec::new(),
        }
    }

    /// Text calls only, as `(message, x, y)`
    pub fn texts(&self) -> Vec<(&str, i32, i32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Text { command, .. } => Some((
                    command.message.as_str(),
                    command.position.x,
                    command.position.y,
                )),
                SurfaceCall::Rectangle(_) => None,
            })
            .collect()
    }

    /// Clear recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    fn rectangle(&mut self, rect: &RectangleCommand) {
        self.calls.push(SurfaceCall::Rectangle(rect.clone()));
    }

    fn text(&mut self, text: &TextCommand, font: &FontHandle) {
        self.calls.push(SurfaceCall::Text {
            command: text.clone(),
            font: font.descriptor().clone(),
        });
    }
}
