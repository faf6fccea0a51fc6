use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// An ink color as understood by both ends of the stream.
///
/// The value is opaque to the protocol: a named color (`"black"`, `"red"`)
/// or a hex triple (`"#ff0000"`). Mapping it to a physical ink is the
/// replaying surface's business.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const BLACK: Color = Color(Cow::Borrowed("black"));
    pub const WHITE: Color = Color(Cow::Borrowed("white"));
    pub const RED: Color = Color(Cow::Borrowed("red"));

    pub fn new(value: impl Into<String>) -> Self {
        Color(Cow::Owned(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color(Cow::Owned(value))
    }
}
