#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the platformer.

mod audio;
mod check;
mod clock;
mod config;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use platformer_rendering::{palette, Presentation, RenderingBackend, Scene};
use platformer_rendering_macroquad::MacroquadBackend;
use platformer_system_flow::Session;
use platformer_world::{LevelCatalog, LevelStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{audio::TracingAudio, clock::FrameClock, config::GameConfig};

/// Command-line arguments accepted by the platformer binary.
#[derive(Debug, Parser)]
#[command(name = "platformer", version, about = "Tile-based platformer")]
struct CliArgs {
    /// Level catalog to play.
    #[arg(long, value_name = "PATH", default_value = "data/levels.rll")]
    levels: PathBuf,
    /// TOML file with `[tuning]` and `[window]` tables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Zero-based catalog index the menu starts from.
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    start_level: usize,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// Decode every level, print a summary and exit without opening a window.
    #[arg(long)]
    check: bool,
}

/// Entry point for the platformer command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let config = GameConfig::load(args.config.as_deref())?;
    let catalog = LevelCatalog::from_path(&args.levels)
        .with_context(|| format!("failed to load levels from {}", args.levels.display()))?;

    if args.check {
        return print_summary(&catalog);
    }

    let mut session = Session::new(LevelStore::new(catalog), config.tuning);
    session.select_level(args.start_level);

    let window = config.window;
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync || window.vsync)
        .with_show_fps(args.show_fps || window.show_fps)
        .with_window_size(window.width, window.height);
    let presentation = Presentation::new(window.title, palette::BACKGROUND, Scene::empty());

    let mut clock = FrameClock::new(config.tuning.frame_rate);
    let mut audio = TracingAudio::default();
    let mut events = Vec::new();

    info!(
        levels = session.level().level_count(),
        start = session.level().level_index(),
        "starting platformer"
    );
    backend.run(presentation, move |elapsed, input, scene| {
        for frame_input in clock.advance(elapsed, input) {
            events.clear();
            session
                .advance(frame_input, &mut events)
                .context("failed to load level")?;
            audio::dispatch(&events, &mut audio);
        }
        scene::populate(&session, scene)?;
        Ok(())
    })
}

fn print_summary(catalog: &LevelCatalog) -> Result<()> {
    let summaries = check::summarise(catalog).context("level catalog is invalid")?;
    for summary in &summaries {
        println!(
            "level {}: {}x{} cells, {} coins, {} enemies, {} exits{}",
            summary.index + 1,
            summary.columns,
            summary.rows,
            summary.coins,
            summary.enemies,
            summary.exits,
            if summary.has_spawn { "" } else { ", no spawn" },
        );
    }
    println!("{} levels ok", summaries.len());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
