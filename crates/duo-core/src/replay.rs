//! Replaying serialized draw streams onto a concrete surface
//!
//! A stream is decoded in full and every font it names is resolved before
//! the first command reaches the surface. A stream that fails anywhere
//! draws nothing.

use std::collections::HashSet;
use std::path::Path;

use duo_wire::{DrawCommand, Payload, RectangleCommand, TextCommand};
use tracing::{debug, info};

use crate::composer::{Layer, LayerPayloads};
use crate::error::{CanvasError, CanvasResult};
use crate::font::{FontCache, FontHandle, FontLoader, FontdueLoader};
use crate::traits::Surface;

/// Counts of what one replay dispatched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub rectangles: usize,
    pub texts: usize,
    /// Distinct font descriptors the stream named
    pub fonts_resolved: usize,
}

impl ReplayStats {
    pub fn commands(&self) -> usize {
        self.rectangles + self.texts
    }
}

/// A command with its font already in hand
enum Resolved {
    Rectangle(RectangleCommand),
    Text(TextCommand, FontHandle),
}

/// Consumer side of the protocol.
///
/// Owns a font cache local to the replaying machine; descriptors recorded
/// elsewhere are resolved through it and never need to match the
/// producer's files.
#[derive(Debug)]
pub struct Replayer {
    fonts: FontCache,
}

impl Replayer {
    pub fn new(loader: impl FontLoader + 'static) -> Self {
        Self {
            fonts: FontCache::new(loader),
        }
    }

    /// Replayer resolving families against a local font file or directory
    pub fn with_font_root(root: impl AsRef<Path>) -> Self {
        Self::new(FontdueLoader::with_root(root.as_ref()))
    }

    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Decode `bytes` and draw every command on `surface`, in order.
    pub fn replay(&mut self, surface: &mut dyn Surface, bytes: &[u8]) -> CanvasResult<ReplayStats> {
        let payload = duo_wire::decode(bytes)?;
        self.replay_payload(surface, payload)
    }

    /// Draw an already decoded stream on `surface`.
    pub fn replay_payload(
        &mut self,
        surface: &mut dyn Surface,
        payload: Payload,
    ) -> CanvasResult<ReplayStats> {
        let (resolved, fonts_resolved) = self.prepare(surface, payload)?;
        let mut stats = dispatch(surface, resolved);
        stats.fonts_resolved = fonts_resolved;
        Ok(stats)
    }

    /// Replay both layers of a frame, black first.
    ///
    /// Both streams are decoded and resolved before either is drawn.
    pub fn replay_layers(
        &mut self,
        surface: &mut dyn Surface,
        payloads: &LayerPayloads,
    ) -> CanvasResult<Vec<(Layer, ReplayStats)>> {
        let mut prepared = Vec::with_capacity(Layer::ALL.len());
        for layer in Layer::ALL {
            let payload = duo_wire::decode(payloads.get(layer))?;
            prepared.push((layer, self.prepare(surface, payload)?));
        }

        let mut all = Vec::with_capacity(prepared.len());
        for (layer, (resolved, fonts_resolved)) in prepared {
            let mut stats = dispatch(surface, resolved);
            stats.fonts_resolved = fonts_resolved;
            info!(
                "Replayed {} layer: {} rectangles, {} texts",
                layer, stats.rectangles, stats.texts
            );
            all.push((layer, stats));
        }
        Ok(all)
    }

    fn prepare(
        &mut self,
        surface: &dyn Surface,
        payload: Payload,
    ) -> CanvasResult<(Vec<Resolved>, usize)> {
        let target = surface.canvas();
        if payload.canvas != target {
            return Err(CanvasError::CanvasMismatch {
                stream: payload.canvas,
                surface: target,
            });
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(payload.commands.len());
        for command in payload.commands {
            resolved.push(match command {
                DrawCommand::Rectangle(rect) => Resolved::Rectangle(rect),
                DrawCommand::Text(text) => {
                    let font = self.fonts.get(&text.font)?;
                    seen.insert(text.font.clone());
                    Resolved::Text(text, font)
                }
            });
        }

        debug!(
            "Prepared {} commands using {} fonts",
            resolved.len(),
            seen.len()
        );
        Ok((resolved, seen.len()))
    }
}

fn dispatch(surface: &mut dyn Surface, resolved: Vec<Resolved>) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for command in resolved {
        match command {
            Resolved::Rectangle(rect) => {
                surface.rectangle(&rect);
                stats.rectangles += 1;
            }
            Resolved::Text(text, font) => {
                surface.text(&text, &font);
                stats.texts += 1;
            }
        }
    }
    stats
}

/// Replay `bytes` onto `surface`, resolving fonts under `font_root`.
pub fn deserialize(
    surface: &mut dyn Surface,
    font_root: &Path,
    bytes: &[u8],
) -> CanvasResult<ReplayStats> {
    Replayer::with_font_root(font_root).replay(surface, bytes)
}
