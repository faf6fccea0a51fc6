//! duo-raster - pure-Rust rasterizing backend for duo-core
//!
//! Replays draw streams into an [`InkBitmap`], one ink per pixel, which can
//! be packed into the 1-bit planes a two-color e-paper controller expects.

mod bitmap;
mod palette;
mod surface;

pub use bitmap::{Ink, InkBitmap};
pub use palette::Palette;
pub use surface::BitmapSurface;
