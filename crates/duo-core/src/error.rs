// src/error.rs
use duo_wire::{CanvasSize, WireError};
use thiserror::Error;

use crate::composer::Layer;
use crate::font::FontLoadError;

/// Errors raised while recording, serializing or replaying draw commands.
///
/// None of these are transient; nothing is retried.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Font error: {source}")]
    FontLoad {
        #[from]
        source: FontLoadError,
    },

    #[error("Draw stream error: {source}")]
    Wire {
        #[from]
        source: WireError,
    },

    #[error("Layer {layer} is not reachable from this recorder")]
    LayerUnavailable { layer: Layer },

    #[error("Canvas mismatch: stream recorded for {stream}, surface is {surface}")]
    CanvasMismatch {
        stream: CanvasSize,
        surface: CanvasSize,
    },
}

impl CanvasError {
    pub fn is_font_load(&self) -> bool {
        matches!(self, CanvasError::FontLoad { .. })
    }

    /// The stream named an operation this build cannot replay
    pub fn is_unknown_command(&self) -> bool {
        matches!(
            self,
            CanvasError::Wire {
                source: WireError::UnknownCommand { .. }
            }
        )
    }

    /// The stream could not be decoded at all
    pub fn is_malformed_stream(&self) -> bool {
        matches!(self, CanvasError::Wire { source } if source.is_malformed())
    }
}

pub type CanvasResult<T> = Result<T, CanvasError>;
