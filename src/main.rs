//! Shadow Runner entry point
//!
//! Headless demo driver: runs the simulation with scripted input and logs
//! session signals. A graphical embedder would replace the scripted input
//! with captured key state and the [`NullRenderer`] with a real one.

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use shadow_runner::WorldConfig;
use shadow_runner::renderer::{NullRenderer, Renderer};
use shadow_runner::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Frames the demo runs before giving up on the scripted pilot
const DEMO_FRAMES: u64 = 20_000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading world config from {path}");
            WorldConfig::from_json_file(&path)?
        }
        None => WorldConfig::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("starting session with seed {seed}");

    let mut state = GameState::new(seed, config);
    let mut renderer = NullRenderer;
    let mut input = TickInput::default();
    let mut runs = 0u32;

    for frame in 0..DEMO_FRAMES {
        // Scripted pilot: run right, hop every 90 frames
        input.right = true;
        input.up = frame % 90 < 2;
        input.restart = false;

        let events = tick(&mut state, &input);
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                log::info!("run {} over, final score {score}", runs + 1);
            }
        }
        renderer.render(&state.frame_view(&events));

        // Restart once to exercise the full session cycle
        if state.phase == GamePhase::GameOver {
            runs += 1;
            if runs >= 2 {
                break;
            }
            input.restart = true;
            tick(&mut state, &input);
        }
    }

    println!("demo finished after {runs} run(s), last score {}", state.score);
    Ok(())
}
