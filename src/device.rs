// src/device.rs
//! Replaying side: rasterize a recorded frame onto the configured panel

use duo_core::{LayerPayloads, Replayer};
use duo_raster::BitmapSurface;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::DashboardResult;

/// Replay both layers onto a bitmap the size of the configured panel.
///
/// The panel size comes from `config`, never from the streams; a stream
/// recorded for another canvas is rejected before anything is drawn.
pub fn replay_frame(
    config: &DashboardConfig,
    replayer: &mut Replayer,
    payloads: &LayerPayloads,
) -> DashboardResult<BitmapSurface> {
    let canvas = config.checked_canvas()?;
    let mut surface = BitmapSurface::new(canvas);
    let stats = replayer.replay_layers(&mut surface, payloads)?;

    let commands: usize = stats.iter().map(|(_, s)| s.commands()).sum();
    info!("Replayed {} commands onto the {} panel", commands, canvas);
    Ok(surface)
}
