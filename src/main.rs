//! Vibe Survival entry point
//!
//! Runs a headless autopilot session at a fixed step and records the score.
//!
//! Usage: `vibe-survival [store.json] [tuning.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use vibe_survival::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use vibe_survival::sim::{GameEvent, TickInput};
use vibe_survival::ui::high_score_line;
use vibe_survival::{App, JsonFileStore, KeyValueStore, MemoryStore, Screen, Tuning};

/// Hard stop for the headless run (ten minutes of model time)
const MAX_MODEL_MS: f64 = 10.0 * 60.0 * 1000.0;

fn main() {
    env_logger::init();
    log::info!("Vibe Survival (headless) starting...");

    let mut args = std::env::args().skip(1);
    let store_path = args.next().unwrap_or_else(|| "vibe_survival.json".to_string());
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let store: Box<dyn KeyValueStore> = match JsonFileStore::open(&store_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; scores will not be saved", e);
            Box::new(MemoryStore::new())
        }
    };

    let mut app = App::new(store, tuning);
    if let Screen::Start { high_score } = app.screen() {
        log::info!("{}", high_score_line(high_score));
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    app.start(seed);

    run(&mut app);

    log::info!("{}", high_score_line(app.high_score()));
}

/// Feed frames through a fixed-step accumulator until the run ends
fn run(app: &mut App) {
    let input = TickInput::idle();
    let mut accumulator = 0.0;
    let mut elapsed = 0.0;
    let mut frames: u64 = 0;
    let frame_ms = SIM_DT_MS;

    while app.session().is_some() && elapsed < MAX_MODEL_MS {
        accumulator += frame_ms.min(MAX_FRAME_MS);
        elapsed += frame_ms;
        frames += 1;

        let mut substeps = 0;
        while accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            for event in app.update(&input, SIM_DT_MS) {
                report(&event);
            }
            accumulator -= SIM_DT_MS;
            substeps += 1;
        }

        // HUD roughly every five seconds
        if frames % 300 == 0 {
            if let Some(hud) = app.hud() {
                log::info!("{} | {} | {}", hud.score_line(), hud.hp_line(), hud.level_line());
            }
        }
    }

    if app.session().is_some() {
        log::info!("Stopped after {:.0}s of model time", elapsed / 1000.0);
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::LevelUp { level } => log::info!("LEVEL UP! ({})", level),
        GameEvent::GameOver(summary) => {
            log::info!(
                "GAME OVER - score {} at level {}{}",
                summary.score,
                summary.level,
                if summary.new_record { " (new record)" } else { "" }
            );
        }
        other => log::trace!("{:?}", other),
    }
}
