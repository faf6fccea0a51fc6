// src/error.rs
use duo_core::CanvasError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Canvas size {width}x{height} is outside 1..={max} pixels per side")]
    CanvasSize { width: u32, height: u32, max: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
