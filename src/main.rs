//! Cat Chase entry point
//!
//! Headless driver: runs one autopilot session to completion and prints the
//! result. With `--json` every frame's snapshot is written to stdout as one
//! JSON line, for piping into an external renderer.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cat_chase::autopilot::autopilot_intent;
use cat_chase::sim::GameEvent;
use cat_chase::{DifficultyKey, MapTheme, Session, Settings, Tuning, run_headless};

#[derive(Debug, Parser)]
#[command(name = "cat-chase", about = "Catch mice, dodge dogs, beat the clock")]
struct Args {
    /// Difficulty preset (easy, normal, hard)
    #[arg(long)]
    difficulty: Option<String>,
    /// Map theme (garden, kitchen, rooftop)
    #[arg(long)]
    map: Option<String>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Stop after this many frames even if the session is still running
    #[arg(long, default_value_t = 100_000)]
    max_frames: u64,
    /// Emit one JSON snapshot per frame on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let tuning = match &settings.tuning_path {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let difficulty = args
        .difficulty
        .as_deref()
        .map(DifficultyKey::resolve)
        .unwrap_or(settings.difficulty);
    let map = args.map.as_deref().map(MapTheme::resolve).unwrap_or(settings.map);
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);

    log::info!("Cat Chase (headless) starting with seed {seed}");

    let mut session = Session::new(seed, settings.stage()).with_tuning(tuning);
    session.start_with(difficulty, map);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error = None;
    let mut caught = 0u32;

    let frames = run_headless(
        &mut session,
        settings.frame_period_ms(),
        args.max_frames,
        autopilot_intent,
        |snapshot, events| {
            caught += events
                .iter()
                .filter(|e| matches!(e, GameEvent::MouseCaught { .. }))
                .count() as u32;
            if args.json && write_error.is_none() {
                let line = serde_json::to_string(snapshot).map_err(anyhow::Error::from);
                if let Err(e) = line.and_then(|l| writeln!(out, "{l}").map_err(Into::into)) {
                    write_error = Some(e);
                }
            }
        },
    );
    if let Some(e) = write_error {
        return Err(e).context("writing snapshots");
    }
    out.flush().context("flushing snapshots")?;
    drop(out);

    let hud = session.snapshot().hud;
    let summary = hud
        .final_message()
        .unwrap_or_else(|| format!("Stopped after {frames} frames. Score: {}", hud.score));
    log::info!("{frames} frames, {caught} mice caught");
    eprintln!(
        "{summary} ({} on {}, {} mice)",
        difficulty.as_str(),
        map.label(),
        caught
    );
    Ok(())
}
