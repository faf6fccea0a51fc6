//! Two-layer composition: one recorder per ink

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use duo_wire::{Anchor, CanvasSize, Color};
use tracing::debug;

use crate::error::CanvasResult;
use crate::font::{FontCache, FontLoader};
use crate::geometry::BBox;
use crate::layout::{self, LayerTarget, TextSegment};
use crate::recorder::{DrawRecorder, SharedFontCache};
use crate::traits::SharedSurface;

/// Ink layer of a two-color panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Black,
    Accent,
}

impl Layer {
    /// Every layer, in replay order
    pub const ALL: [Layer; 2] = [Layer::Black, Layer::Accent];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Black => "black",
            Layer::Accent => "accent",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialized streams of both layers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerPayloads {
    pub black: Vec<u8>,
    pub accent: Vec<u8>,
}

impl LayerPayloads {
    pub fn get(&self, layer: Layer) -> &[u8] {
        match layer {
            Layer::Black => &self.black,
            Layer::Accent => &self.accent,
        }
    }
}

/// Black and accent recorders over the same canvas, sharing one font cache
#[derive(Debug)]
pub struct LayerComposer {
    black: DrawRecorder,
    accent: DrawRecorder,
}

impl LayerComposer {
    pub fn new(
        canvas: CanvasSize,
        font_family: impl Into<String>,
        loader: impl FontLoader + 'static,
    ) -> Self {
        let fonts = Rc::new(RefCell::new(FontCache::new(loader)));
        Self::with_font_cache(canvas, font_family, fonts)
    }

    pub fn with_font_cache(
        canvas: CanvasSize,
        font_family: impl Into<String>,
        fonts: SharedFontCache,
    ) -> Self {
        let font_family = font_family.into();
        debug!("Composing {} canvas with {}", canvas, font_family);
        Self {
            black: DrawRecorder::new(Layer::Black, canvas, font_family.clone(), Rc::clone(&fonts)),
            accent: DrawRecorder::new(Layer::Accent, canvas, font_family, fonts),
        }
    }

    /// Preview both layers on one surface
    pub fn with_preview(self, surface: SharedSurface) -> Self {
        Self {
            black: self.black.with_preview(Rc::clone(&surface)),
            accent: self.accent.with_preview(surface),
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.black.canvas()
    }

    pub fn layer(&self, layer: Layer) -> &DrawRecorder {
        match layer {
            Layer::Black => &self.black,
            Layer::Accent => &self.accent,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut DrawRecorder {
        match layer {
            Layer::Black => &mut self.black,
            Layer::Accent => &mut self.accent,
        }
    }

    pub fn black_mut(&mut self) -> &mut DrawRecorder {
        &mut self.black
    }

    pub fn accent_mut(&mut self) -> &mut DrawRecorder {
        &mut self.accent
    }

    /// Lay out a line whose segments may land on either layer.
    ///
    /// The line is measured on `layer`; segments without a layer of their
    /// own are drawn there too.
    #[allow(clippy::too_many_arguments)]
    pub fn text_series(
        &mut self,
        layer: Layer,
        x: i32,
        y: i32,
        segments: &[TextSegment],
        size: f32,
        anchor: Anchor,
        color: &Color,
    ) -> CanvasResult<(BBox, Vec<BBox>)> {
        layout::text_series(self, layer, x, y, segments, size, anchor, color)
    }

    pub fn serialize(&self) -> CanvasResult<LayerPayloads> {
        Ok(LayerPayloads {
            black: self.black.serialize()?,
            accent: self.accent.serialize()?,
        })
    }
}

impl LayerTarget for LayerComposer {
    fn can_reach(&self, _layer: Layer) -> bool {
        true
    }

    fn target(&mut self, layer: Layer) -> CanvasResult<&mut DrawRecorder> {
        Ok(self.layer_mut(layer))
    }
}
