//! # duo-wire
//!
//! Data model and byte format for draw commands recorded against a
//! two-color canvas. A command log is encoded with [`encode`] on the
//! producer side and decoded with [`decode`] on the replaying side.
//!
//! Fonts travel as a [`FontDescriptor`] (family or path plus pixel size),
//! never as glyph data.

pub mod codec;
pub mod color;
pub mod command;

pub use codec::{decode, encode, Payload, WireError, WireResult, WIRE_VERSION};
pub use color::Color;
pub use command::{
    Anchor, AnchorParseError, CanvasSize, DrawCommand, FontDescriptor, FontSizeError,
    HorizontalAnchor, Point,
    RectangleCommand, TextCommand, VerticalAnchor,
};
