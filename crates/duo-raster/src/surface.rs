//! [`Surface`] implementation painting into an [`InkBitmap`]

use duo_core::layout::anchor_origin;
use duo_core::{CanvasSize, FontHandle, RectangleCommand, Surface, TextCommand};
use tracing::trace;

use crate::bitmap::{Ink, InkBitmap};
use crate::palette::Palette;

/// Glyph coverage at or above this paints the pixel
const COVERAGE_THRESHOLD: u8 = 128;

/// Rasterizes replayed commands without anti-aliasing, one ink per pixel
#[derive(Clone, Debug)]
pub struct BitmapSurface {
    bitmap: InkBitmap,
    palette: Palette,
}

impl BitmapSurface {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            bitmap: InkBitmap::new(canvas),
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn bitmap(&self) -> &InkBitmap {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> InkBitmap {
        self.bitmap
    }

    fn stroke(&mut self, left: i32, top: i32, right: i32, bottom: i32, width: u32, ink: Ink) {
        for inset in 0..i32::try_from(width).unwrap_or(i32::MAX) {
            let (l, t, r, b) = (left + inset, top + inset, right - inset, bottom - inset);
            if l > r || t > b {
                break;
            }
            self.bitmap.fill_rect(l, t, r, t, ink);
            self.bitmap.fill_rect(l, b, r, b, ink);
            self.bitmap.fill_rect(l, t, l, b, ink);
            self.bitmap.fill_rect(r, t, r, b, ink);
        }
    }
}

impl Surface for BitmapSurface {
    fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.bitmap.width(), self.bitmap.height())
    }

    fn rectangle(&mut self, rect: &RectangleCommand) {
        let (x0, y0) = (rect.top_left.x, rect.top_left.y);
        let (x1, y1) = (rect.bottom_right.x, rect.bottom_right.y);
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        if let Some(fill) = &rect.fill {
            let ink = self.palette.ink_for(fill);
            self.bitmap.fill_rect(left, top, right, bottom, ink);
        }
        if let Some(outline) = &rect.outline {
            let ink = self.palette.ink_for(outline);
            self.stroke(left, top, right, bottom, rect.width, ink);
        }
    }

    fn text(&mut self, text: &TextCommand, font: &FontHandle) {
        let ink = self.palette.ink_for(&text.fill);
        let advance = font.text_advance(&text.message);
        let (dx, dy) = anchor_origin(advance, font.ascent(), font.descent(), text.anchor);

        let baseline = (text.position.y as f32 + dy + font.ascent()).round() as i32;
        let mut pen = text.position.x as f32 + dx;
        trace!("Rasterizing {:?} at pen {:.1}, baseline {}", text.message, pen, baseline);

        for ch in text.message.chars() {
            let glyph = font.rasterize(ch);
            let origin_x = pen.round() as i32 + glyph.xmin;
            let origin_y = baseline - (glyph.ymin + glyph.height as i32);

            for (i, &coverage) in glyph.coverage.iter().enumerate() {
                if coverage >= COVERAGE_THRESHOLD {
                    let gx = (i % glyph.width) as i32;
                    let gy = (i / glyph.width) as i32;
                    self.bitmap.set(origin_x + gx, origin_y + gy, ink);
                }
            }
            pen += glyph.advance;
        }
    }
}
