//! Font resolution for measuring and drawing text
//!
//! A [`FontCache`] turns a [`FontDescriptor`](duo_wire::FontDescriptor) into
//! a shared [`FontHandle`] exactly once per descriptor. Where the bytes come
//! from is the business of the cache's [`FontLoader`].

pub mod cache;
pub mod discovery;
pub mod loader;

pub use cache::{FontCache, FontLoadError};
pub use discovery::{is_font_file, resolve_font_path};
pub use loader::{FontLoader, FontdueFace, FontdueLoader};

use std::fmt;
use std::sync::Arc;

use duo_wire::FontDescriptor;

/// Shared handle to a loaded font at one pixel size
pub type FontHandle = Arc<dyn FontFace>;

/// Coverage bitmap of one glyph, positioned relative to the pen on the baseline
#[derive(Debug, Clone, Default)]
pub struct RasterGlyph {
    /// Left edge relative to the pen position
    pub xmin: i32,
    /// Bottom edge relative to the baseline, positive up
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
    /// Row-major coverage, top row first, one byte per pixel
    pub coverage: Vec<u8>,
}

/// A font loaded at a fixed pixel size.
///
/// Metrics are in pixels. `descent` is reported as a positive distance
/// below the baseline.
pub trait FontFace: fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &FontDescriptor;
    fn ascent(&self) -> f32;
    fn descent(&self) -> f32;
    fn advance(&self, ch: char) -> f32;
    fn rasterize(&self, ch: char) -> RasterGlyph;

    /// Sum of advances, without kerning
    fn text_advance(&self, message: &str) -> f32 {
        message.chars().map(|ch| self.advance(ch)).sum()
    }

    fn line_height(&self) -> f32 {
        self.ascent() + self.descent()
    }
}
