// tests/dashboard_tests.rs
//! Dashboard layout recorded against the dummy backend and replayed

use chrono::{DateTime, FixedOffset, TimeZone};
use duo_core::dummy_backend::{MonospaceLoader, RecordingSurface};
use duo_core::{
    Anchor, CanvasError, CanvasSize, Color, DrawCommand, FontDescriptor, Layer, LayerComposer,
    LayerPayloads, Point, Replayer, TextCommand,
};
use duo_raster::{BitmapSurface, Ink};
use duochrome::{render_dashboard, replay_frame, CalendarViewModel, DashboardConfig, DashboardError};

fn thursday_morning() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(-7 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 10, 17, 11, 30, 0)
        .unwrap()
}

fn compose(view: &CalendarViewModel) -> (LayerComposer, duochrome::DashboardLayout) {
    let config = DashboardConfig::default();
    let mut composer = LayerComposer::new(config.canvas(), config.font_family(), MonospaceLoader::new());
    let layout = render_dashboard(&mut composer, view, &config).unwrap();
    (composer, layout)
}

fn messages(composer: &LayerComposer, layer: Layer) -> Vec<String> {
    composer
        .layer(layer)
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text.message.clone()),
            DrawCommand::Rectangle(_) => None,
        })
        .collect()
}

#[test]
fn test_accent_layer_carries_highlights_only() {
    let (composer, _) = compose(&CalendarViewModel::sample(thursday_morning()));

    assert_eq!(
        messages(&composer, Layer::Accent),
        vec!["Thursday", "Daily standup", "27°"]
    );
    for command in composer.layer(Layer::Accent).commands() {
        match command {
            DrawCommand::Text(text) => assert_eq!(text.fill, Color::RED),
            DrawCommand::Rectangle(rect) => assert_eq!(rect.outline, Some(Color::RED)),
        }
    }
}

#[test]
fn test_black_layer_starts_with_frame() {
    let (composer, _) = compose(&CalendarViewModel::sample(thursday_morning()));

    match &composer.layer(Layer::Black).commands()[0] {
        DrawCommand::Rectangle(rect) => {
            assert_eq!((rect.top_left.x, rect.top_left.y), (0, 0));
            assert_eq!((rect.bottom_right.x, rect.bottom_right.y), (799, 479));
            assert_eq!(rect.width, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
    let black = messages(&composer, Layer::Black);
    assert!(black.contains(&", 17 October".to_string()));
    assert!(black.contains(&"12:00  ".to_string()));
}

#[test]
fn test_layout_boxes() {
    let (_, layout) = compose(&CalendarViewModel::sample(thursday_morning()));

    assert_eq!((layout.date_strip.x, layout.date_strip.y), (20, 20));
    // One running event plus a full page of upcoming ones
    assert_eq!(layout.agenda.len(), 6);
    assert!(layout.agenda.windows(2).all(|w| w[0].bottom() < w[1].y));

    let weather = layout.weather.unwrap();
    assert_eq!((weather.right(), weather.bottom()), (780, 460));
}

#[test]
fn test_empty_day() {
    let (composer, layout) = compose(&CalendarViewModel::new(thursday_morning()));

    assert_eq!(layout.agenda.len(), 1);
    assert!(layout.weather.is_none());
    assert!(messages(&composer, Layer::Black).contains(&"Nothing scheduled".to_string()));
    assert_eq!(messages(&composer, Layer::Accent), vec!["Thursday"]);
}

#[test]
fn test_replayed_dashboard_inks_both_planes() {
    let (composer, _) = compose(&CalendarViewModel::sample(thursday_morning()));
    let payloads = composer.serialize().unwrap();

    let mut surface = BitmapSurface::new(composer.canvas());
    let stats = Replayer::new(MonospaceLoader::new())
        .replay_layers(&mut surface, &payloads)
        .unwrap();

    assert_eq!(stats[0].0, Layer::Black);
    assert_eq!(stats[1].1.texts, 3);
    assert_eq!(stats[1].1.rectangles, 1);

    let bitmap = surface.bitmap();
    assert!(bitmap.count(Ink::Black) > 0);
    assert!(bitmap.count(Ink::Accent) > 0);
    // Frame corner
    assert_eq!(bitmap.get(0, 0), Some(Ink::Black));
    assert_eq!(bitmap.pack_plane(Ink::Black).len(), 100 * 480);
}

#[test]
fn test_replay_is_deterministic() {
    let (composer, _) = compose(&CalendarViewModel::sample(thursday_morning()));
    let payloads = composer.serialize().unwrap();

    let mut first = RecordingSurface::new(composer.canvas());
    let mut second = RecordingSurface::new(composer.canvas());
    Replayer::new(MonospaceLoader::new())
        .replay_layers(&mut first, &payloads)
        .unwrap();
    Replayer::new(MonospaceLoader::new())
        .replay_layers(&mut second, &payloads)
        .unwrap();

    assert_eq!(first.calls, second.calls);
    assert!(!first.calls.is_empty());
}

#[test]
fn test_underline_sits_under_running_event() {
    let (composer, layout) = compose(&CalendarViewModel::sample(thursday_morning()));
    let running = layout.agenda[0];

    let underline = composer
        .layer(Layer::Accent)
        .commands()
        .iter()
        .find_map(|command| match command {
            DrawCommand::Rectangle(rect) => Some(rect.clone()),
            DrawCommand::Text(_) => None,
        })
        .unwrap();

    assert_eq!(underline.top_left.x, running.x);
    assert_eq!(underline.top_left.y, running.bottom());
    assert!(underline.bottom_right.x < running.right());
}

#[test]
fn test_replay_frame_uses_configured_panel() {
    let (composer, _) = compose(&CalendarViewModel::sample(thursday_morning()));
    let payloads = composer.serialize().unwrap();

    let surface = replay_frame(
        &DashboardConfig::default(),
        &mut Replayer::new(MonospaceLoader::new()),
        &payloads,
    )
    .unwrap();

    assert_eq!((surface.bitmap().width(), surface.bitmap().height()), (800, 480));
    assert!(surface.bitmap().count(Ink::Accent) > 0);
}

#[test]
fn test_replay_frame_rejects_oversized_stream_canvas() {
    let (composer, _) = compose(&CalendarViewModel::sample(thursday_morning()));
    let mut payloads = composer.serialize().unwrap();
    let commands = composer.layer(Layer::Black).commands();
    payloads.black = duo_wire::encode(CanvasSize::new(u32::MAX, u32::MAX), commands).unwrap();

    let err = replay_frame(
        &DashboardConfig::default(),
        &mut Replayer::new(MonospaceLoader::new()),
        &payloads,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        DashboardError::Canvas(CanvasError::CanvasMismatch { stream, .. })
            if stream == CanvasSize::new(u32::MAX, u32::MAX)
    ));
}

#[test]
fn test_replay_frame_rejects_unusable_font_size() {
    let canvas = DashboardConfig::default().canvas();
    let text = DrawCommand::Text(TextCommand {
        position: Point::new(10, 10),
        message: "x".to_string(),
        font: FontDescriptor::new("fonts/Inter.ttf", -25.0),
        fill: Color::BLACK,
        anchor: Anchor::LEFT_ASCENDER,
        meta: None,
    });
    let payloads = LayerPayloads {
        black: duo_wire::encode(canvas, &[text]).unwrap(),
        accent: duo_wire::encode(canvas, &[]).unwrap(),
    };

    let err = replay_frame(
        &DashboardConfig::default(),
        &mut Replayer::new(MonospaceLoader::new()),
        &payloads,
    )
    .unwrap_err();

    match err {
        DashboardError::Canvas(err) => assert!(err.is_malformed_stream()),
        other => panic!("unexpected {other:?}"),
    }
}
