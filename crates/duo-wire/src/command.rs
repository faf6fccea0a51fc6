//! Recorded drawing operations.
//!
//! Every operation the replaying side may execute is a variant of the
//! closed [`DrawCommand`] enum with its own typed argument struct.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A pixel coordinate on the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Logical canvas dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Logical font identity: a family name or font file path, plus a pixel size.
///
/// This is both the cache key on either side of the stream and the only
/// font information that is ever encoded. Decoding rejects sizes that are
/// not finite and positive.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawFontDescriptor")]
pub struct FontDescriptor {
    pub family: String,
    pub size: f32,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Whether `size` can be encoded and rasterized
    pub fn is_valid_size(size: f32) -> bool {
        size.is_finite() && size > 0.0
    }

    pub fn has_valid_size(&self) -> bool {
        Self::is_valid_size(self.size)
    }
}

#[derive(Deserialize)]
struct RawFontDescriptor {
    family: String,
    size: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid font size {0}: expected a finite size above zero")]
pub struct FontSizeError(pub f32);

impl TryFrom<RawFontDescriptor> for FontDescriptor {
    type Error = FontSizeError;

    fn try_from(raw: RawFontDescriptor) -> Result<Self, Self::Error> {
        if !Self::is_valid_size(raw.size) {
            return Err(FontSizeError(raw.size));
        }
        Ok(Self::new(raw.family, raw.size))
    }
}

// Sizes compare bitwise so descriptors can key a HashMap.
impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for FontDescriptor {}

impl Hash for FontDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}px", self.family, self.size)
    }
}

/// Horizontal component of an [`Anchor`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Middle,
    Right,
}

/// Vertical component of an [`Anchor`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    /// Top of the ascender line
    Ascender,
    /// Halfway between ascender and descender
    Middle,
    Baseline,
    /// Bottom of the descender line
    Descender,
}

/// Which point of a text's bounding box is pinned to the draw coordinate.
///
/// Written as two characters: `l`/`m`/`r` followed by `a`/`m`/`s`/`d`,
/// e.g. `la` (top-left) or `ms` (centered on the baseline).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl Anchor {
    /// Top-left of the ascender box; the canonical measuring anchor.
    pub const LEFT_ASCENDER: Anchor = Anchor::new(HorizontalAnchor::Left, VerticalAnchor::Ascender);
    pub const MIDDLE_BASELINE: Anchor =
        Anchor::new(HorizontalAnchor::Middle, VerticalAnchor::Baseline);

    pub const fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::LEFT_ASCENDER
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid text anchor {0:?}: expected [lmr][amsd]")]
pub struct AnchorParseError(pub String);

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(h), Some(v), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(AnchorParseError(s.to_string()));
        };

        let horizontal = match h {
            'l' => HorizontalAnchor::Left,
            'm' => HorizontalAnchor::Middle,
            'r' => HorizontalAnchor::Right,
            _ => return Err(AnchorParseError(s.to_string())),
        };
        let vertical = match v {
            'a' => VerticalAnchor::Ascender,
            'm' => VerticalAnchor::Middle,
            's' => VerticalAnchor::Baseline,
            'd' => VerticalAnchor::Descender,
            _ => return Err(AnchorParseError(s.to_string())),
        };

        Ok(Anchor::new(horizontal, vertical))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.horizontal {
            HorizontalAnchor::Left => 'l',
            HorizontalAnchor::Middle => 'm',
            HorizontalAnchor::Right => 'r',
        };
        let v = match self.vertical {
            VerticalAnchor::Ascender => 'a',
            VerticalAnchor::Middle => 'm',
            VerticalAnchor::Baseline => 's',
            VerticalAnchor::Descender => 'd',
        };
        write!(f, "{h}{v}")
    }
}

impl TryFrom<String> for Anchor {
    type Error = AnchorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.to_string()
    }
}

/// Filled and/or outlined axis-aligned rectangle.
///
/// Both corners are inclusive, matching how the dashboard layout code
/// derives them from a box's `right`/`bottom` edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangleCommand {
    pub top_left: Point,
    pub bottom_right: Point,
    pub outline: Option<Color>,
    pub fill: Option<Color>,
    /// Outline stroke width in pixels
    pub width: u32,
}

/// Anchored single-line text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    pub position: Point,
    pub message: String,
    pub font: FontDescriptor,
    pub fill: Color,
    pub anchor: Anchor,
    /// Free-form annotation carried along for debugging; never drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rectangle(RectangleCommand),
    Text(TextCommand),
}

impl DrawCommand {
    /// Operation tags this version knows how to replay
    pub const KNOWN_OPS: [&'static str; 2] = ["rectangle", "text"];

    pub fn op_name(&self) -> &'static str {
        match self {
            DrawCommand::Rectangle(_) => "rectangle",
            DrawCommand::Text(_) => "text",
        }
    }

    pub fn font(&self) -> Option<&FontDescriptor> {
        match self {
            DrawCommand::Rectangle(_) => None,
            DrawCommand::Text(text) => Some(&text.font),
        }
    }
}

impl From<RectangleCommand> for DrawCommand {
    fn from(command: RectangleCommand) -> Self {
        DrawCommand::Rectangle(command)
    }
}

impl From<TextCommand> for DrawCommand {
    fn from(command: TextCommand) -> Self {
        DrawCommand::Text(command)
    }
}
