//! duo-core - backend-agnostic core of the two-color draw pipeline
//!
//! Layout code draws against a [`DrawRecorder`] (or the pair of them held
//! by a [`LayerComposer`]). Nothing is rasterized: each call is measured
//! through the [`FontCache`], appended to the recorder's command log and
//! optionally previewed on a local [`Surface`]. The log is serialized with
//! `duo-wire` and replayed elsewhere by a [`Replayer`], which owns its own
//! font cache and dispatches every command to a concrete [`Surface`].

pub mod composer;
pub mod dummy_backend;
pub mod error;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod recorder;
pub mod replay;
pub mod traits;

// Re-export main types
pub use composer::{Layer, LayerComposer, LayerPayloads};
pub use error::{CanvasError, CanvasResult};
pub use font::{FontCache, FontFace, FontHandle, FontLoadError, FontLoader, FontdueLoader};
pub use geometry::BBox;
pub use layout::{LayerTarget, TextSegment};
pub use recorder::{DrawRecorder, SharedFontCache};
pub use replay::{deserialize, ReplayStats, Replayer};
pub use traits::{SharedSurface, Surface};

// The wire vocabulary is part of this crate's API
pub use duo_wire::{
    Anchor, CanvasSize, Color, DrawCommand, FontDescriptor, HorizontalAnchor, Point,
    RectangleCommand, TextCommand, VerticalAnchor,
};
