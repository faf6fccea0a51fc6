// src/main.rs
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use duo_core::{FontdueLoader, Layer, LayerComposer, LayerPayloads, Replayer};
use duo_raster::{BitmapSurface, Ink, InkBitmap};
use tracing::info;
use tracing_subscriber::EnvFilter;

use duochrome::constants::{ACCENT_PAYLOAD, ACCENT_PLANE, BLACK_PAYLOAD, BLACK_PLANE};
use duochrome::{render_dashboard, replay_frame, CalendarViewModel, DashboardConfig};

#[derive(Parser, Debug)]
#[command(name = "duochrome", version, about = "Two-color e-paper dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out the dashboard and write one draw stream per layer
    Record {
        /// Font file used for measuring; its path is recorded in every text command
        #[arg(long)]
        font: PathBuf,

        /// Directory receiving black.json and accent.json
        #[arg(long)]
        out: PathBuf,

        /// TOML dashboard configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Rasterize recorded streams with locally installed fonts
    Replay {
        /// Font file, or directory searched by family name
        #[arg(long)]
        font_root: PathBuf,

        /// Directory holding black.json and accent.json
        #[arg(long)]
        input: PathBuf,

        /// Write packed 1-bit planes (black.bin, accent.bin) here
        #[arg(long)]
        planes: Option<PathBuf>,

        /// TOML dashboard configuration; its canvas is the panel size
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Record { font, out, config } => record(&font, &out, config.as_deref()),
        Command::Replay {
            font_root,
            input,
            planes,
            config,
        } => replay(&font_root, &input, planes.as_deref(), config.as_deref()),
    }
}

fn load_config(config: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn record(font: &Path, out: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config)?.with_font_path(font);

    let mut composer = LayerComposer::new(config.canvas(), config.font_family(), FontdueLoader::new());
    let preview = config.preview.then(|| Rc::new(RefCell::new(BitmapSurface::new(config.canvas()))));
    if let Some(surface) = &preview {
        composer = composer.with_preview(surface.clone());
    }

    let view = CalendarViewModel::sample(Local::now().fixed_offset());
    let layout = render_dashboard(&mut composer, &view, &config)?;
    info!("Laid out {} agenda lines", layout.agenda.len());

    let payloads = composer.serialize()?;
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    for layer in Layer::ALL {
        let path = out.join(payload_name(layer));
        fs::write(&path, payloads.get(layer)).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "Wrote {} commands for the {} layer to {}",
            composer.layer(layer).len(),
            layer,
            path.display()
        );
    }

    if let Some(surface) = preview {
        log_ink(surface.borrow().bitmap());
    }
    Ok(())
}

fn replay(
    font_root: &Path,
    input: &Path,
    planes: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let read = |layer: Layer| {
        let path = input.join(payload_name(layer));
        fs::read(&path).with_context(|| format!("reading {}", path.display()))
    };
    let payloads = LayerPayloads {
        black: read(Layer::Black)?,
        accent: read(Layer::Accent)?,
    };

    let surface = replay_frame(&config, &mut Replayer::with_font_root(font_root), &payloads)?;

    let bitmap = surface.bitmap();
    log_ink(bitmap);
    println!("{}", bitmap.to_ascii());

    if let Some(dir) = planes {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for (name, ink) in [(BLACK_PLANE, Ink::Black), (ACCENT_PLANE, Ink::Accent)] {
            let path = dir.join(name);
            fs::write(&path, bitmap.pack_plane(ink))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} plane to {}", name, path.display());
        }
    }
    Ok(())
}

fn payload_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Black => BLACK_PAYLOAD,
        Layer::Accent => ACCENT_PAYLOAD,
    }
}

fn log_ink(bitmap: &InkBitmap) {
    info!(
        "{}x{} canvas: {} black, {} accent pixels",
        bitmap.width(),
        bitmap.height(),
        bitmap.count(Ink::Black),
        bitmap.count(Ink::Accent)
    );
}
