// src/constants.rs

// Panel geometry
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 480;
pub const DEFAULT_MARGIN: i32 = 20;
/// Largest panel side accepted from configuration
pub const MAX_CANVAS_SIDE: u32 = 4096;

// Typography
pub const DEFAULT_FONT_PATH: &str = "fonts/Inter.ttf";
pub const DEFAULT_TITLE_SIZE: f32 = 40.0;
pub const DEFAULT_BODY_SIZE: f32 = 25.0;
pub const DEFAULT_SMALL_SIZE: f32 = 18.0;

// Inks, as recorded on the wire
pub const DEFAULT_BLACK_INK: &str = "black";
pub const DEFAULT_ACCENT_INK: &str = "red";

// Agenda
pub const AGENDA_LIMIT: usize = 5;
pub const LINE_GAP: i32 = 6;
pub const RULE_THICKNESS: i32 = 2;

// Output file names
pub const BLACK_PAYLOAD: &str = "black.json";
pub const ACCENT_PAYLOAD: &str = "accent.json";
pub const BLACK_PLANE: &str = "black.bin";
pub const ACCENT_PLANE: &str = "accent.bin";
