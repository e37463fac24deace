//! Application entry point for the particle-network header.
//!
//! This binary parses the command line, loads the configuration, sets up
//! logging and eframe/egui, and delegates all interactive logic and
//! rendering to [`Viewer`] from the `viewer` module.

mod canvas;
mod viewer;

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sim_core::{config::Config, types::Viewport};
use viewer::Viewer;

const INITIAL_SIZE: [f32; 2] = [1280.0, 720.0];

#[derive(Parser, Debug)]
#[command(about = "Animated particle-network header")]
struct Args {
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Placement seed; overrides the configuration file.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without the native backend.
    #[arg(long)]
    script_only: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_yaml::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if args.script_only {
        cfg.native_enabled = false;
    }
    Ok(cfg)
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the configuration cannot be loaded or eframe fails to create
///   the native window or event loop.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = load_config(&args)?;
    log::debug!("{cfg:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(INITIAL_SIZE)
            .with_title("Particle Header"),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Header",
        options,
        Box::new(move |_cc| {
            let viewport = Viewport::new(INITIAL_SIZE[0], INITIAL_SIZE[1]);
            Ok(Box::new(Viewer::new(cfg, viewport)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
