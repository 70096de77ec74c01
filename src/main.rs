//! Rogue Run entry point
//!
//! Native build runs the simulation headlessly with the autopilot driving
//! input. Usage: `rogue-run [seed] [max_frames] [settings.json]`

use rogue_run::records::RunRecord;
use rogue_run::sim::{GameEvent, Simulation, autopilot};
use rogue_run::{RunRecords, Settings};

/// Nominal host frame interval (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rogue Run (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = args.get(2).map(Settings::load).unwrap_or_default();
    if let Some(seed) = args.first() {
        match seed.parse() {
            Ok(seed) => settings.seed = Some(seed),
            Err(e) => log::warn!("Ignoring seed {:?}: {}", seed, e),
        }
    }
    let max_frames = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Ignoring frame limit: {}", e);
            DEFAULT_MAX_FRAMES
        }
        None => DEFAULT_MAX_FRAMES,
    };

    let mut sim = Simulation::new(settings);
    let mut records = RunRecords::new();
    let seed = sim.state().seed;

    let mut now = 0.0;
    let mut summary = None;
    for _ in 0..max_frames {
        let input = autopilot(sim.state());
        let ended = sim.frame(now, &input);
        now += FRAME_MS;

        for event in sim.drain_events() {
            match event {
                GameEvent::LevelCleared { level } => log::info!("Cleared level {}", level),
                GameEvent::PlayerDied { cause } => log::info!("Player died: {:?}", cause),
                other => log::debug!("{:?}", other),
            }
        }

        if let Some(ended) = ended {
            if let Some(rank) = records.add(RunRecord::new(ended, seed)) {
                log::info!("Run ranked #{}", rank);
            }
            summary = Some(ended);
            break;
        }
    }

    if summary.is_none() {
        log::info!("Frame limit reached with the run still in progress");
    }

    let report = serde_json::json!({
        "seed": seed,
        "frames": sim.state().frame,
        "summary": summary.unwrap_or_else(|| sim.state().summary()),
        "finished": summary.is_some(),
        "snapshot": sim.snapshot(),
        "records": records,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Simulation` directly
}
