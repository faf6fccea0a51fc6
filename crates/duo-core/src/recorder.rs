//! Draw command recorder
//!
//! A [`DrawRecorder`] looks like a drawing canvas to layout code but only
//! appends commands to a log. Text is measured through the font cache so
//! layout math is exact, and the recorded text command carries the font's
//! descriptor rather than the loaded font.

use std::cell::RefCell;
use std::rc::Rc;

use duo_wire::{
    Anchor, CanvasSize, Color, DrawCommand, FontDescriptor, Point, RectangleCommand, TextCommand,
};
use tracing::trace;

use crate::composer::Layer;
use crate::error::{CanvasError, CanvasResult};
use crate::font::{FontCache, FontHandle, FontLoadError};
use crate::geometry::BBox;
use crate::layout::{self, LayerTarget, TextSegment};
use crate::traits::SharedSurface;

/// Producer-side font cache, shared by the recorders of one composer
pub type SharedFontCache = Rc<RefCell<FontCache>>;

/// Append-only capture surface for one layer
pub struct DrawRecorder {
    layer: Layer,
    canvas: CanvasSize,
    font_family: String,
    fonts: SharedFontCache,
    log: Vec<DrawCommand>,
    preview: Option<SharedSurface>,
}

impl DrawRecorder {
    /// Create a recorder drawing text in `font_family` (a family name or font
    /// file path, recorded verbatim in every text command).
    pub fn new(
        layer: Layer,
        canvas: CanvasSize,
        font_family: impl Into<String>,
        fonts: SharedFontCache,
    ) -> Self {
        Self {
            layer,
            canvas,
            font_family: font_family.into(),
            fonts,
            log: Vec::new(),
            preview: None,
        }
    }

    /// Also render every recorded command onto `surface` as it is recorded.
    ///
    /// Development aid only; the preview is never part of the serialized output.
    pub fn with_preview(mut self, surface: SharedSurface) -> Self {
        self.preview = Some(surface);
        self
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// The recorded log, oldest first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn descriptor(&self, size: f32) -> FontDescriptor {
        FontDescriptor::new(self.font_family.clone(), size)
    }

    fn font(&self, size: f32) -> CanvasResult<FontHandle> {
        let descriptor = self.descriptor(size);
        Ok(self.fonts.borrow_mut().get(&descriptor)?)
    }

    /// Append a command as-is and preview it.
    ///
    /// Text commands are previewed with the font their descriptor resolves to
    /// in this recorder's cache, so a foreign descriptor can fail here. A text
    /// size that could not be encoded is always rejected.
    pub fn record(&mut self, command: DrawCommand) -> CanvasResult<()> {
        if let DrawCommand::Text(text) = &command {
            if !text.font.has_valid_size() {
                return Err(FontLoadError::invalid_size(&text.font).into());
            }
        }

        let font = match &command {
            DrawCommand::Text(text) if self.preview.is_some() => {
                Some(self.fonts.borrow_mut().get(&text.font)?)
            }
            _ => None,
        };
        self.push(command, font.as_ref());
        Ok(())
    }

    fn push(&mut self, command: DrawCommand, font: Option<&FontHandle>) {
        trace!("[{}] #{} {:?}", self.layer, self.log.len(), command);

        if let Some(preview) = &self.preview {
            let mut surface = preview.borrow_mut();
            match (&command, font) {
                (DrawCommand::Rectangle(rect), _) => surface.rectangle(rect),
                (DrawCommand::Text(text), Some(font)) => surface.text(text, font),
                (DrawCommand::Text(_), None) => {}
            }
        }

        self.log.push(command);
    }

    /// Record a rectangle with corners `(x, y)` and `(right, bottom)`.
    pub fn draw_rectangle(
        &mut self,
        bbox: BBox,
        outline: Option<Color>,
        fill: Option<Color>,
        width: u32,
    ) {
        let command = RectangleCommand {
            top_left: bbox.top_left(),
            bottom_right: bbox.bottom_right(),
            outline,
            fill,
            width,
        };
        self.push(DrawCommand::Rectangle(command), None);
    }

    pub fn outline_box(&mut self, bbox: BBox, color: Color, width: u32) {
        self.draw_rectangle(bbox, Some(color), None, width);
    }

    pub fn fill_box(&mut self, bbox: BBox, color: Color) {
        self.draw_rectangle(bbox, None, Some(color), 1);
    }

    /// Draw a `width`-pixel rule along the bottom edge of `bbox`.
    pub fn underline_box(&mut self, bbox: BBox, color: Color, width: u32) {
        let rule = bbox.underline(i32::try_from(width).unwrap_or(i32::MAX));
        self.outline_box(rule, color, width);
    }

    /// Box `message` would occupy if drawn at the origin under `anchor`.
    pub fn measure_text(&self, message: &str, size: f32, anchor: Anchor) -> CanvasResult<BBox> {
        let font = self.font(size)?;
        Ok(layout::measure(font.as_ref(), message, anchor))
    }

    /// Record anchored text and return the box it occupies.
    pub fn draw_text(
        &mut self,
        position: Point,
        message: &str,
        size: f32,
        fill: Color,
        anchor: Anchor,
        underline: bool,
    ) -> CanvasResult<BBox> {
        let font = self.font(size)?;
        let bounds = layout::measure(font.as_ref(), message, anchor).offset(position.x, position.y);

        let command = TextCommand {
            position,
            message: message.to_string(),
            font: font.descriptor().clone(),
            fill: fill.clone(),
            anchor,
            meta: None,
        };
        self.push(DrawCommand::Text(command), Some(&font));

        if underline {
            self.underline_box(bounds, fill, 1);
        }
        Ok(bounds)
    }

    /// Lay out styled segments as one line; see [`layout::text_series`].
    ///
    /// Segments routed to another layer fail with
    /// [`CanvasError::LayerUnavailable`]; use
    /// [`LayerComposer::text_series`](crate::LayerComposer::text_series) for
    /// mixed-layer lines.
    pub fn text_series(
        &mut self,
        x: i32,
        y: i32,
        segments: &[TextSegment],
        size: f32,
        anchor: Anchor,
        color: &Color,
    ) -> CanvasResult<(BBox, Vec<BBox>)> {
        let layer = self.layer;
        layout::text_series(self, layer, x, y, segments, size, anchor, color)
    }

    /// Snapshot the log in wire format. The log is left untouched.
    pub fn serialize(&self) -> CanvasResult<Vec<u8>> {
        Ok(duo_wire::encode(self.canvas, &self.log)?)
    }
}

impl LayerTarget for DrawRecorder {
    fn can_reach(&self, layer: Layer) -> bool {
        layer == self.layer
    }

    fn target(&mut self, layer: Layer) -> CanvasResult<&mut DrawRecorder> {
        if layer == self.layer {
            Ok(self)
        } else {
            Err(CanvasError::LayerUnavailable { layer })
        }
    }
}

impl std::fmt::Debug for DrawRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawRecorder")
            .field("layer", &self.layer)
            .field("canvas", &self.canvas)
            .field("font_family", &self.font_family)
            .field("commands", &self.log.len())
            .field("preview", &self.preview.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_backend::{MonospaceLoader, RecordingSurface, SurfaceCall};

    const CANVAS: CanvasSize = CanvasSize::new(800, 480);

    fn recorder() -> DrawRecorder {
        let fonts = Rc::new(RefCell::new(FontCache::new(MonospaceLoader::new())));
        DrawRecorder::new(Layer::Black, CANVAS, "fonts/Mono.ttf", fonts)
    }

    #[test]
    fn test_rectangle_corners() {
        let mut rec = recorder();
        rec.draw_rectangle(BBox::new(10, 20, 30, 40), Some(Color::BLACK), None, 2);

        assert_eq!(
            rec.commands(),
            &[DrawCommand::Rectangle(RectangleCommand {
                top_left: Point::new(10, 20),
                bottom_right: Point::new(40, 60),
                outline: Some(Color::BLACK),
                fill: None,
                width: 2,
            })]
        );
    }

    #[test]
    fn test_negative_geometry_is_recorded_verbatim() {
        let mut rec = recorder();
        rec.fill_box(BBox::new(5, 5, -10, -3), Color::RED);
        match &rec.commands()[0] {
            DrawCommand::Rectangle(rect) => {
                assert_eq!(rect.top_left, Point::new(5, 5));
                assert_eq!(rect.bottom_right, Point::new(-5, 2));
                assert_eq!(rect.fill, Some(Color::RED));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_draw_text_records_descriptor_and_returns_box() {
        let mut rec = recorder();
        let bounds = rec
            .draw_text(Point::new(400, 240), "AB", 25.0, Color::BLACK, Anchor::MIDDLE_BASELINE, false)
            .unwrap();

        assert_eq!(bounds, BBox::new(385, 220, 30, 25));
        assert_eq!(rec.len(), 1);
        match &rec.commands()[0] {
            DrawCommand::Text(text) => {
                assert_eq!(text.position, Point::new(400, 240));
                assert_eq!(text.font, FontDescriptor::new("fonts/Mono.ttf", 25.0));
                assert_eq!(text.anchor.to_string(), "ms");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_underlined_text_adds_rule_under_box() {
        let mut rec = recorder();
        let bounds = rec
            .draw_text(Point::new(10, 10), "Hi", 25.0, Color::RED, Anchor::LEFT_ASCENDER, true)
            .unwrap();

        assert_eq!(rec.len(), 2);
        match &rec.commands()[1] {
            DrawCommand::Rectangle(rect) => {
                assert_eq!(rect.top_left, Point::new(bounds.x, bounds.bottom()));
                assert_eq!(rect.bottom_right, Point::new(bounds.right(), bounds.bottom() + 1));
                assert_eq!(rect.outline, Some(Color::RED));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_measure_does_not_record() {
        let rec = recorder();
        let b = rec.measure_text("Sunny", 25.0, Anchor::LEFT_ASCENDER).unwrap();
        assert_eq!(b, BBox::new(0, 0, 75, 25));
        assert!(rec.is_empty());
    }

    #[test]
    fn test_font_failure_surfaces_immediately() {
        let fonts = Rc::new(RefCell::new(FontCache::new(MonospaceLoader::with_families(["Other"]))));
        let mut rec = DrawRecorder::new(Layer::Black, CANVAS, "Mono", fonts);

        let err = rec
            .draw_text(Point::new(0, 0), "x", 12.0, Color::BLACK, Anchor::LEFT_ASCENDER, false)
            .unwrap_err();
        assert!(err.is_font_load());
        assert!(rec.is_empty());
    }

    #[test]
    fn test_unusable_sizes_are_rejected_before_recording() {
        let mut rec = recorder();

        for size in [f32::INFINITY, f32::NAN, -25.0, 0.0] {
            let err = rec
                .draw_text(Point::new(0, 0), "x", size, Color::BLACK, Anchor::LEFT_ASCENDER, false)
                .unwrap_err();
            assert!(err.is_font_load());
            assert!(rec.measure_text("x", size, Anchor::LEFT_ASCENDER).is_err());
        }

        let err = rec
            .record(DrawCommand::Text(TextCommand {
                position: Point::new(0, 0),
                message: "x".to_string(),
                font: rec.descriptor(f32::INFINITY),
                fill: Color::BLACK,
                anchor: Anchor::LEFT_ASCENDER,
                meta: None,
            }))
            .unwrap_err();
        assert!(matches!(
            err,
            CanvasError::FontLoad {
                source: FontLoadError::InvalidSize { .. }
            }
        ));

        assert!(rec.is_empty());
        let payload = duo_wire::decode(&rec.serialize().unwrap()).unwrap();
        assert!(payload.commands.is_empty());
    }

    #[test]
    fn test_oversized_underline_width_saturates() {
        let mut rec = recorder();
        rec.underline_box(BBox::new(10, 10, 20, 25), Color::BLACK, u32::MAX);

        match &rec.commands()[0] {
            DrawCommand::Rectangle(rect) => {
                assert_eq!(rect.top_left, Point::new(10, 35));
                assert_eq!(rect.bottom_right, Point::new(30, i32::MAX));
                assert!(rect.bottom_right.y >= rect.top_left.y);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_serialize_is_a_snapshot() {
        let mut rec = recorder();
        rec.outline_box(BBox::new(0, 0, 800, 480), Color::BLACK, 1);

        let first = rec.serialize().unwrap();
        let second = rec.serialize().unwrap();
        assert_eq!(first, second);
        assert_eq!(rec.len(), 1);

        rec.fill_box(BBox::new(1, 1, 2, 2), Color::BLACK);
        assert_ne!(rec.serialize().unwrap(), first);
    }

    #[test]
    fn test_preview_sees_every_command() {
        let surface = Rc::new(RefCell::new(RecordingSurface::new(CANVAS)));
        let mut rec = recorder().with_preview(surface.clone());

        rec.outline_box(BBox::new(0, 0, 10, 10), Color::BLACK, 1);
        rec.draw_text(Point::new(1, 1), "A", 16.0, Color::BLACK, Anchor::LEFT_ASCENDER, false)
            .unwrap();

        let surface = surface.borrow();
        let calls = &surface.calls;
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], SurfaceCall::Rectangle(_)));
        match &calls[1] {
            SurfaceCall::Text { font, .. } => assert_eq!(font.size, 16.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_record_keeps_meta() {
        let mut rec = recorder();
        rec.record(DrawCommand::Text(TextCommand {
            position: Point::new(0, 0),
            message: "tagged".to_string(),
            font: rec.descriptor(12.0),
            fill: Color::BLACK,
            anchor: Anchor::LEFT_ASCENDER,
            meta: Some("weather".to_string()),
        }))
        .unwrap();

        match &rec.commands()[0] {
            DrawCommand::Text(text) => assert_eq!(text.meta.as_deref(), Some("weather")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lone_recorder_rejects_foreign_layer() {
        let mut rec = recorder();
        let segments = [TextSegment::new("A"), TextSegment::new("B").on_layer(Layer::Accent)];
        let err = rec
            .text_series(0, 0, &segments, 25.0, Anchor::LEFT_ASCENDER, &Color::BLACK)
            .unwrap_err();

        assert!(matches!(err, CanvasError::LayerUnavailable { layer: Layer::Accent }));
        assert!(rec.is_empty());
    }
}
