// src/config.rs
use std::path::{Path, PathBuf};

use duo_core::{CanvasSize, Color};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACCENT_INK, DEFAULT_BLACK_INK, DEFAULT_BODY_SIZE, DEFAULT_CANVAS_HEIGHT,
    DEFAULT_CANVAS_WIDTH, DEFAULT_FONT_PATH, DEFAULT_MARGIN, DEFAULT_SMALL_SIZE,
    DEFAULT_TITLE_SIZE, MAX_CANVAS_SIDE,
};
use crate::error::{DashboardError, DashboardResult};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Recorded verbatim as the family of every text command
    pub font_path: PathBuf,
    pub title_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub margin: i32,
    pub black_ink: String,
    pub accent_ink: String,
    /// Rasterize locally while recording
    pub preview: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            title_size: DEFAULT_TITLE_SIZE,
            body_size: DEFAULT_BODY_SIZE,
            small_size: DEFAULT_SMALL_SIZE,
            margin: DEFAULT_MARGIN,
            black_ink: DEFAULT_BLACK_INK.to_string(),
            accent_ink: DEFAULT_ACCENT_INK.to_string(),
            preview: false,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> DashboardResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.checked_canvas()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    pub fn with_sizes(mut self, title: f32, body: f32, small: f32) -> Self {
        self.title_size = title;
        self.body_size = body;
        self.small_size = small;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin.max(0);
        self
    }

    pub fn with_inks(mut self, black: &str, accent: &str) -> Self {
        self.black_ink = black.to_string();
        self.accent_ink = accent.to_string();
        self
    }

    pub fn with_preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// The canvas, if both sides are within `1..=MAX_CANVAS_SIDE`
    pub fn checked_canvas(&self) -> DashboardResult<CanvasSize> {
        let valid = |side: u32| (1..=MAX_CANVAS_SIDE).contains(&side);
        if !valid(self.canvas_width) || !valid(self.canvas_height) {
            return Err(DashboardError::CanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
                max: MAX_CANVAS_SIDE,
            });
        }
        Ok(self.canvas())
    }

    pub fn font_family(&self) -> String {
        self.font_path.to_string_lossy().into_owned()
    }

    pub fn black(&self) -> Color {
        Color::new(self.black_ink.clone())
    }

    pub fn accent(&self) -> Color {
        Color::new(self.accent_ink.clone())
    }
}
