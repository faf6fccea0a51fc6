//! Text measurement and single-line, multi-segment text layout
//!
//! Measured boxes span the font's line (ascender to descender) rather than
//! the ink of the particular glyphs, so every string at one size has the
//! same height and segments drawn at the same top share a baseline.

use duo_wire::{Anchor, Color, HorizontalAnchor, Point, VerticalAnchor};

use crate::composer::Layer;
use crate::error::CanvasResult;
use crate::font::FontFace;
use crate::geometry::BBox;
use crate::recorder::DrawRecorder;

/// One styled run of a text series
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextSegment {
    pub message: String,
    /// `None` inherits the series color
    pub color: Option<Color>,
    pub underline: bool,
    /// `None` draws on the layer the series was issued on
    pub layer: Option<Layer>,
}

impl TextSegment {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }
}

impl From<&str> for TextSegment {
    fn from(message: &str) -> Self {
        TextSegment::new(message)
    }
}

/// Something a text series can route segments through: a lone recorder, or
/// a composer holding one recorder per layer.
pub trait LayerTarget {
    fn can_reach(&self, layer: Layer) -> bool;
    fn target(&mut self, layer: Layer) -> CanvasResult<&mut DrawRecorder>;
}

/// Offset of the text box's top-left corner from the anchor point.
pub fn anchor_origin(advance: f32, ascent: f32, descent: f32, anchor: Anchor) -> (f32, f32) {
    let left = match anchor.horizontal {
        HorizontalAnchor::Left => 0.0,
        HorizontalAnchor::Middle => -advance / 2.0,
        HorizontalAnchor::Right => -advance,
    };
    let top = match anchor.vertical {
        VerticalAnchor::Ascender => 0.0,
        VerticalAnchor::Middle => -(ascent + descent) / 2.0,
        VerticalAnchor::Baseline => -ascent,
        VerticalAnchor::Descender => -(ascent + descent),
    };
    (left, top)
}

/// Box of `message` drawn at the origin under `anchor`.
///
/// The size depends only on the text and font; the position on the anchor.
pub fn measure(font: &dyn FontFace, message: &str, anchor: Anchor) -> BBox {
    let advance = font.text_advance(message);
    let (left, top) = anchor_origin(advance, font.ascent(), font.descent(), anchor);
    BBox::new(
        left.round() as i32,
        top.round() as i32,
        advance.round() as i32,
        font.line_height().round() as i32,
    )
}

/// Vertical shift that puts top-left-anchored text where `anchored` text sits.
///
/// `anchored` and `canonical` are the same string measured at the origin
/// under the requested anchor and under `la`. The height terms cancel for
/// line-box measurement and only matter if a measuring primitive attributes
/// padding differently per anchor.
pub fn anchor_correction(anchored: BBox, canonical: BBox) -> i32 {
    anchored.y - canonical.y + canonical.height - anchored.height
}

/// Lay `segments` out as one line at `(x, y)` under `anchor`.
///
/// The whole line is measured once under `anchor`; each segment is then
/// drawn top-left-anchored at a running cursor, on its own color and layer.
/// Returns the line's box and one box per segment, in input order.
///
/// Every segment's layer is checked before anything is drawn, so a series
/// that cannot be routed records nothing.
#[allow(clippy::too_many_arguments)]
pub fn text_series<T: LayerTarget + ?Sized>(
    target: &mut T,
    layer: Layer,
    x: i32,
    y: i32,
    segments: &[TextSegment],
    size: f32,
    anchor: Anchor,
    color: &Color,
) -> CanvasResult<(BBox, Vec<BBox>)> {
    for segment in segments {
        let segment_layer = segment.layer.unwrap_or(layer);
        if !target.can_reach(segment_layer) {
            return Err(crate::CanvasError::LayerUnavailable {
                layer: segment_layer,
            });
        }
    }

    let line: String = segments.iter().map(|s| s.message.as_str()).collect();

    let base = target.target(layer)?;
    let anchored = base.measure_text(&line, size, anchor)?;
    let canonical = base.measure_text(&line, size, Anchor::LEFT_ASCENDER)?;
    let global = anchored.offset(x, y);
    let top = y + anchor_correction(anchored, canonical);

    let mut cursor = global.x;
    let mut boxes = Vec::with_capacity(segments.len());
    for segment in segments {
        let fill = segment.color.as_ref().unwrap_or(color).clone();
        let recorder = target.target(segment.layer.unwrap_or(layer))?;
        let bounds = recorder.draw_text(
            Point::new(cursor, top),
            &segment.message,
            size,
            fill,
            Anchor::LEFT_ASCENDER,
            segment.underline,
        )?;
        cursor += bounds.width;
        boxes.push(bounds);
    }

    Ok((global, boxes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_backend::MonospaceFace;
    use duo_wire::FontDescriptor;

    // 25px monospace: advance 15, ascent 20, descent 5
    fn face() -> MonospaceFace {
        MonospaceFace::new(FontDescriptor::new("Mono", 25.0))
    }

    fn anchor(code: &str) -> Anchor {
        code.parse().unwrap()
    }

    #[test]
    fn test_measure_positions_by_anchor() {
        let font = face();
        let cases = [
            ("la", BBox::new(0, 0, 30, 25)),
            ("ma", BBox::new(-15, 0, 30, 25)),
            ("ra", BBox::new(-30, 0, 30, 25)),
            ("lm", BBox::new(0, -13, 30, 25)),
            ("ms", BBox::new(-15, -20, 30, 25)),
            ("rd", BBox::new(-30, -25, 30, 25)),
        ];
        for (code, expected) in cases {
            assert_eq!(measure(&font, "AB", anchor(code)), expected, "anchor {code}");
        }
    }

    #[test]
    fn test_size_is_anchor_independent() {
        let font = face();
        let reference = measure(&font, "Thursday", Anchor::LEFT_ASCENDER);
        for code in ["la", "mm", "rs", "ld", "md"] {
            let b = measure(&font, "Thursday", anchor(code));
            assert_eq!((b.width, b.height), (reference.width, reference.height));
        }
    }

    #[test]
    fn test_measure_is_pure() {
        let font = face();
        let first = measure(&font, "Mostly Sunny", anchor("mm"));
        let second = measure(&font, "Mostly Sunny", anchor("mm"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_correction_lines_up_with_anchored_top() {
        let font = face();
        for code in ["la", "lm", "ls", "ld", "ms"] {
            let anchored = measure(&font, "Hello", anchor(code));
            let canonical = measure(&font, "Hello", Anchor::LEFT_ASCENDER);
            assert_eq!(anchor_correction(anchored, canonical), anchored.y);
        }
    }

    #[test]
    fn test_correction_accounts_for_height_discrepancy() {
        // A primitive that pads the anchored box by 2px at the top
        let anchored = BBox::new(0, -22, 30, 27);
        let canonical = BBox::new(0, 0, 30, 25);
        assert_eq!(anchor_correction(anchored, canonical), -24);
    }

    #[test]
    fn test_segment_builders() {
        let segment = TextSegment::new("B")
            .with_color(Color::RED)
            .underlined()
            .on_layer(Layer::Accent);
        assert_eq!(segment.message, "B");
        assert_eq!(segment.color, Some(Color::RED));
        assert!(segment.underline);
        assert_eq!(segment.layer, Some(Layer::Accent));
        assert_eq!(TextSegment::from("A"), TextSegment::new("A"));
    }
}
